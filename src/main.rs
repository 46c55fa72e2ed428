// 该文件是 Danqing （丹青叠彩） 项目的一部分。
// src/main.rs - 项目主程序
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

mod args;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use danqing::{catalog::ClassCatalog, payload, render::Overlay};

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = args::Args::parse();

  info!("源图像: {}", args.input.display());
  info!("预测负载: {}", args.predictions.display());
  info!("输出路径: {}", args.output.display());

  let image = image::ImageReader::open(&args.input)
    .with_context(|| format!("无法打开图像: {}", args.input.display()))?
    .decode()
    .with_context(|| format!("无法解码图像: {}", args.input.display()))?
    .into_rgb8();
  info!("图像尺寸: {}x{}", image.width(), image.height());

  let raw = std::fs::read_to_string(&args.predictions)
    .with_context(|| format!("无法读取预测负载: {}", args.predictions.display()))?;
  let value: serde_json::Value = serde_json::from_str(&raw).context("预测负载不是合法的 JSON")?;
  let result = payload::parse_detect_payload(&value)?;
  info!("解析完成: {} 个有效检测", result.count);

  let overlay = Overlay::new(ClassCatalog::coco());

  let now = std::time::Instant::now();
  let jpeg = overlay.render(&image, &result)?;
  info!("渲染完成，耗时: {:.2?}", now.elapsed());

  std::fs::write(&args.output, &jpeg)
    .with_context(|| format!("无法写入输出文件: {}", args.output.display()))?;
  info!("叠加结果已保存: {} ({} 字节)", args.output.display(), jpeg.len());

  if args.base64 {
    println!("{}", payload::to_base64(&jpeg));
  }

  Ok(())
}
