//! # qcreport - 量子化学计算报告生成工具
//!
//! 将上游解析器产出的计算记录（JSON）组装为结构化报告：
//! 分子信息、计算细节、结果表格、图片与光谱、原子坐标。
//!
//! ## 子命令
//! - `build`   - 由一组记录生成一份报告
//! - `batch`   - 并行为多个分子目录生成报告
//! - `spectra` - 生成 UV-可见吸收谱和 IR 谱图片
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (记录读取)
//!   │     ├── report/    (报告组装引擎)
//!   │     ├── render/    (Markdown/终端/JSON/CSV 输出)
//!   │     ├── plot/      (光谱图)
//!   │     ├── batch/     (批量并行)
//!   │     └── models/    (数据模型)
//!   ├── config.rs   (配置加载)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod config;
mod error;
mod models;
mod parsers;
mod plot;
mod render;
mod report;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
