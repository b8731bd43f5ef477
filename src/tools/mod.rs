// ABOUTME: Built-in (CORE) tools for common agent operations.
// ABOUTME: File I/O, search, command execution, web access, skill admin.

mod bash;
mod fs_ops;
mod list_files;
mod read_file;
mod search;
mod skill_admin;
mod web_fetch;
mod write_file;

pub use bash::BashTool;
pub use fs_ops::FsTool;
pub use list_files::ListFilesTool;
pub use read_file::ReadFileTool;
pub use search::SearchTool;
pub use skill_admin::{CreateSkillTool, DeleteSkillTool};
pub use web_fetch::WebFetchTool;
pub use write_file::WriteFileTool;
