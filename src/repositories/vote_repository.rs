use crate::entities::{community_answer_vote, user_vote};
use crate::repositories::{AnswerRepository, is_unique_violation};
use anyhow::Result;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, TransactionTrait};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The vote was stored; carries the new like count.
    Recorded(i32),
    AlreadyVoted,
}

/// One vote per (answer, IP) pair, enforced by the unique index. The vote
/// row and the like counter are written in one transaction.
pub struct VoteRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> VoteRepository<'a, C> {
    pub fn with_connection(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn vote_official(&self, answer_id: Uuid, ip_address: &str) -> Result<VoteOutcome> {
        let vote = user_vote::ActiveModel {
            id: Set(Uuid::new_v4()),
            answer_id: Set(answer_id),
            ip_address: Set(ip_address.to_string()),
            created_at: Set(chrono::Utc::now().naive_utc()),
        };
        let txn = self.db.begin().await?;
        match vote.insert(&txn).await {
            Ok(_) => {
                let likes = AnswerRepository::with_connection(&txn)
                    .increment_official_likes(answer_id)
                    .await?;
                txn.commit().await?;
                Ok(VoteOutcome::Recorded(likes))
            }
            Err(err) if is_unique_violation(&err) => {
                txn.rollback().await?;
                Ok(VoteOutcome::AlreadyVoted)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn vote_community(&self, answer_id: Uuid, ip_address: &str) -> Result<VoteOutcome> {
        let vote = community_answer_vote::ActiveModel {
            id: Set(Uuid::new_v4()),
            answer_id: Set(answer_id),
            ip_address: Set(ip_address.to_string()),
            created_at: Set(chrono::Utc::now().naive_utc()),
        };
        let txn = self.db.begin().await?;
        match vote.insert(&txn).await {
            Ok(_) => {
                let likes = AnswerRepository::with_connection(&txn)
                    .increment_community_likes(answer_id)
                    .await?;
                txn.commit().await?;
                Ok(VoteOutcome::Recorded(likes))
            }
            Err(err) if is_unique_violation(&err) => {
                txn.rollback().await?;
                Ok(VoteOutcome::AlreadyVoted)
            }
            Err(err) => Err(err.into()),
        }
    }
}
