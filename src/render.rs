// 该文件是 Danqing （丹青叠彩） 项目的一部分。
// src/render.rs - 检测结果叠加渲染
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use std::io::Cursor;

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use thiserror::Error;
use tracing::{debug, trace};

use crate::catalog::ClassCatalog;
use crate::detection::{DetectionResult, InvalidDetectionResult};

mod font;
pub use self::font::{FontTier, FontUnavailable, LabelFont};

/// 边框与标签底色（红色）
const BOX_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
/// 标签文字颜色（白色）
const TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
/// 边框线宽（像素），向内增长
const STROKE_WIDTH: i64 = 2;

#[derive(Error, Debug)]
pub enum RenderError {
  #[error("检测结果无效: {0}")]
  Invalid(#[from] InvalidDetectionResult),
  #[error("图像编码失败: {0}")]
  Encoding(#[from] image::ImageError),
}

/// 检测结果叠加渲染器。
///
/// 持有类别目录和标签字体，本身无其他状态；各次调用互不相关，
/// 多线程下对不同图像并发调用是安全的。
pub struct Overlay {
  catalog: ClassCatalog,
  font: LabelFont,
}

impl Overlay {
  pub fn new(catalog: ClassCatalog) -> Self {
    let font = LabelFont::load();
    debug!("标签字体层级: {:?}", font.tier());
    Self { catalog, font }
  }

  pub fn with_font(catalog: ClassCatalog, font: LabelFont) -> Self {
    Self { catalog, font }
  }

  /// 渲染：校验检测结果，克隆源图像并绘制叠加层，重编码为 JPEG 字节。
  /// 调用方的图像保持不变。
  pub fn render(&self, image: &RgbImage, result: &DetectionResult) -> Result<Vec<u8>, RenderError> {
    result.validate()?;
    let mut drawn = image.clone();
    self.draw_validated(&mut drawn, result);
    Ok(encode_jpeg(&drawn)?)
  }

  /// 原地绘制变体：直接修改调用方的像素缓冲。
  /// 校验失败时全有或全无，不产生部分输出。
  pub fn draw(&self, image: &mut RgbImage, result: &DetectionResult) -> Result<(), RenderError> {
    result.validate()?;
    self.draw_validated(image, result);
    Ok(())
  }

  fn draw_validated(&self, image: &mut RgbImage, result: &DetectionResult) {
    for (bbox, score, class_id) in result.iter() {
      let (left, top, right, bottom) = denormalize(bbox, image.width(), image.height());
      trace!(
        "绘制检测框: class={} score={:.2} box=({}, {}, {}, {})",
        class_id, score, left, top, right, bottom
      );
      stroke_rect(image, left, top, right, bottom);
      let label = self.label_text(class_id, score);
      self.draw_label(image, left, top, &label);
    }
  }

  /// 标签文本："<名称> <两位小数置信度>"
  fn label_text(&self, class_id: u32, score: f32) -> String {
    format!("{} {:.2}", self.catalog.label(class_id), score)
  }

  /// 在框的左上角绘制标签：先按当前字体度量文本尺寸，
  /// 填充同尺寸的背景矩形，再叠加白色文本。
  fn draw_label(&self, image: &mut RgbImage, left: i64, top: i64, label: &str) {
    let (text_w, text_h) = text_size(self.font.scale(), self.font.font(), label);
    if text_w == 0 || text_h == 0 {
      return;
    }

    let x = left.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
    let y = top.clamp(i32::MIN as i64, i32::MAX as i64) as i32;

    draw_filled_rect_mut(image, Rect::at(x, y).of_size(text_w, text_h), BOX_COLOR);
    draw_text_mut(
      image,
      TEXT_COLOR,
      x,
      y,
      self.font.scale(),
      self.font.font(),
      label,
    );
  }
}

/// 将归一化坐标 [y_min, x_min, y_max, x_max] 换算为像素坐标
/// (left, top, right, bottom)。不裁剪越界坐标，也不校验 min <= max：
/// 退化或反向的框按原样换算，画布之外的像素在绘制时丢弃。
fn denormalize(bbox: &[f32; 4], width: u32, height: u32) -> (i64, i64, i64, i64) {
  let [ymin, xmin, ymax, xmax] = *bbox;
  let left = (xmin * width as f32).floor() as i64;
  let right = (xmax * width as f32).floor() as i64;
  let top = (ymin * height as f32).floor() as i64;
  let bottom = (ymax * height as f32).floor() as i64;
  (left, top, right, bottom)
}

/// 绘制 2 像素宽的矩形边框，线宽向内增长。
/// 坐标允许超出画布，逐像素裁剪，反向的框不落任何像素。
fn stroke_rect(image: &mut RgbImage, left: i64, top: i64, right: i64, bottom: i64) {
  let (w, h) = (image.width() as i64, image.height() as i64);

  for t in 0..STROKE_WIDTH {
    let (l, r) = (left + t, right - t);
    let (tp, btm) = (top + t, bottom - t);

    // 上下两条边，只遍历落在画布内的列
    for x in l.max(0)..=r.min(w - 1) {
      if (0..h).contains(&tp) {
        image.put_pixel(x as u32, tp as u32, BOX_COLOR);
      }
      if (0..h).contains(&btm) {
        image.put_pixel(x as u32, btm as u32, BOX_COLOR);
      }
    }

    // 左右两条边
    for y in tp.max(0)..=btm.min(h - 1) {
      if (0..w).contains(&l) {
        image.put_pixel(l as u32, y as u32, BOX_COLOR);
      }
      if (0..w).contains(&r) {
        image.put_pixel(r as u32, y as u32, BOX_COLOR);
      }
    }
  }
}

/// 以编码器默认质量将图像重编码为 JPEG 字节
pub fn encode_jpeg(image: &RgbImage) -> Result<Vec<u8>, image::ImageError> {
  let mut buf = Cursor::new(Vec::new());
  let encoder = image::codecs::jpeg::JpegEncoder::new(&mut buf);
  image.write_with_encoder(encoder)?;
  Ok(buf.into_inner())
}
