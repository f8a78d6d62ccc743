mod documents;
mod envelope;
mod publish;

pub use documents::*;
pub use envelope::*;
pub use publish::*;
