//! Request-independent logic: pagination, quiz selection, payload validation.

pub mod pagination;
pub mod quiz;
mod validation;

pub use pagination::{paginate, PageQuery, QUESTIONS_PER_PAGE};
pub use quiz::select_question;
pub use validation::{LooseInt, QuestionPayload, QuizCategory, QuizRequest, SearchRequest};
