// 该文件是 Danqing （丹青叠彩） 项目的一部分。
// src/args.rs - 项目参数配置
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use std::path::PathBuf;

use clap::Parser;

/// Danqing 项目参数配置
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 源图像路径
  /// 支持格式: *.jpg, *.jpeg, *.png
  #[arg(long, value_name = "IMAGE")]
  pub input: PathBuf,

  /// 远端模型返回的预测负载（JSON 文件）
  #[arg(long, value_name = "PREDICTIONS")]
  pub predictions: PathBuf,

  /// 叠加渲染结果的输出路径（JPEG）
  #[arg(long, value_name = "OUTPUT")]
  pub output: PathBuf,

  /// 同时在标准输出打印 base64 编码的渲染结果
  #[arg(long)]
  pub base64: bool,
}
