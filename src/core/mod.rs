// Core - 입력 액션, 창 기하 계산
pub mod actions;
pub mod geometry;
