mod build;
mod interaction;
mod view;

pub(in crate::app) use interaction::InteractionController;

#[cfg(test)]
pub(in crate::app) use build::tests;
