// Dashboard canvas - layout placement and record filtering for AI-built dashboards
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
