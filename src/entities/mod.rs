//! `SeaORM` entities

pub mod prelude;

pub mod blog_category;
pub mod comment;
pub mod community_answer;
pub mod community_answer_vote;
pub mod expense;
pub mod finance_student;
pub mod message;
pub mod post;
pub mod public_question;
pub mod question_answer;
pub mod question_category;
pub mod question_report;
pub mod question_subscription;
pub mod session;
pub mod student_profile;
pub mod teacher;
pub mod trial_booking;
pub mod user;
pub mod user_vote;
pub mod sea_orm_active_enums;
