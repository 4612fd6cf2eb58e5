pub mod openai;
pub mod voyage;
