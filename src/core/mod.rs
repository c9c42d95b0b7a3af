// Core: 액션 레지스트리, 설정
pub mod actions;
pub mod config;
