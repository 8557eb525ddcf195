//! `SeaORM` entity definitions.

pub mod categories;
pub mod daily_summaries;
pub mod monthly_summaries;
pub mod products;
pub mod sea_orm_active_enums;
pub mod transactions;
pub mod users;
pub mod weekly_summaries;
pub mod yearly_summaries;
