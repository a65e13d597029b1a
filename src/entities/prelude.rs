//! `SeaORM` entity prelude

pub use super::blog_category::Entity as BlogCategory;
pub use super::comment::Entity as Comment;
pub use super::community_answer::Entity as CommunityAnswer;
pub use super::community_answer_vote::Entity as CommunityAnswerVote;
pub use super::expense::Entity as Expense;
pub use super::finance_student::Entity as FinanceStudent;
pub use super::message::Entity as Message;
pub use super::post::Entity as Post;
pub use super::public_question::Entity as PublicQuestion;
pub use super::question_answer::Entity as QuestionAnswer;
pub use super::question_category::Entity as QuestionCategory;
pub use super::question_report::Entity as QuestionReport;
pub use super::question_subscription::Entity as QuestionSubscription;
pub use super::session::Entity as Session;
pub use super::student_profile::Entity as StudentProfile;
pub use super::teacher::Entity as Teacher;
pub use super::trial_booking::Entity as TrialBooking;
pub use super::user::Entity as User;
pub use super::user_vote::Entity as UserVote;
