pub(crate) mod form;
pub(crate) mod goals;
pub(crate) mod overview;
pub(crate) mod statement;
