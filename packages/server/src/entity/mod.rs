pub mod attachment;
pub mod event;
pub mod event_member;
pub mod lap_record;
pub mod liked_news;
pub mod member;
pub mod news;
pub mod role;
pub mod track;
