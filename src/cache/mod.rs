pub mod token;
pub mod token_store;
pub mod token_validator;
