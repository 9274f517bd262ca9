pub mod auth;
pub mod feedback;
pub mod health;
pub mod history;
pub mod lang;
pub mod map;
pub mod open;
pub mod recommend;
pub mod search;
