pub mod category;
pub mod parser;
pub mod result;

pub use category::FakeArticleType;
pub use parser::{ParsedAssessment, parse};
pub use result::{CredibilityResult, Evaluation};
