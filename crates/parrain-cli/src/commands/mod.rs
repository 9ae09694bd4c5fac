pub mod dispatch;
pub mod draw;
pub mod export;
pub mod import;
pub mod init;
pub mod reset;
pub mod serve;
pub mod stats;
pub mod undo;
