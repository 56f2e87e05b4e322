pub(crate) mod caller_origin;
