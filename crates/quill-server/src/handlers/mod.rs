pub mod documents;
pub mod publish;
