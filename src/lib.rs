pub mod constants;
pub mod cpf;
pub mod cpf_errors;
pub mod resolver;
pub mod time;
