pub(crate) mod support;

mod behaviour;
