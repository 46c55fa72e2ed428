// 该文件是 Danqing （丹青叠彩） 项目的一部分。
// src/render/font.rs - 标签字体的两级查找
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use ab_glyph::{FontArc, PxScale};
use thiserror::Error;
use tracing::{debug, warn};

/// 首选的可缩放字体大小（像素）
const SCALABLE_FONT_SIZE: f32 = 20.0;
/// 内置回退字体的固有大小（像素），标签度量随之变小
const BUILTIN_FONT_SIZE: f32 = 13.0;

/// 常见的系统字体位置，按顺序尝试
const SCALABLE_FONT_PATHS: &[&str] = &[
  "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
  "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
  "/usr/share/fonts/TTF/DejaVuSans.ttf",
  "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Error, Debug)]
pub enum FontUnavailable {
  #[error("系统中没有可用的可缩放字体")]
  NoScalableFont,
}

/// 标签字体的层级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontTier {
  /// 系统可缩放字体，固定 20 像素
  Scalable,
  /// 内置字体，固有大小
  Builtin,
}

/// 标签字体：两级查找，优先系统可缩放字体，缺失时退回内置字体。
/// 回退改变标签度量，属于可接受的降级而不是错误。
#[derive(Debug, Clone)]
pub struct LabelFont {
  font: FontArc,
  scale: PxScale,
  tier: FontTier,
}

impl Default for LabelFont {
  fn default() -> Self {
    Self::load()
  }
}

impl LabelFont {
  /// 两级加载，总是成功
  pub fn load() -> Self {
    match Self::scalable() {
      Ok(font) => font,
      Err(e) => {
        warn!("可缩放字体不可用，退回内置字体: {}", e);
        Self::builtin()
      }
    }
  }

  /// 第一级：从系统字体路径加载可缩放字体
  pub fn scalable() -> Result<Self, FontUnavailable> {
    for path in SCALABLE_FONT_PATHS {
      let Ok(data) = std::fs::read(path) else {
        continue;
      };
      match FontArc::try_from_vec(data) {
        Ok(font) => {
          debug!("加载可缩放字体: {}", path);
          return Ok(Self {
            font,
            scale: PxScale::from(SCALABLE_FONT_SIZE),
            tier: FontTier::Scalable,
          });
        }
        Err(e) => warn!("字体文件无效: {}: {}", path, e),
      }
    }
    Err(FontUnavailable::NoScalableFont)
  }

  /// 第二级：内置字体数据
  pub fn builtin() -> Self {
    let font_data = include_bytes!("../../assets/DejaVuSans.ttf");
    let font = FontArc::try_from_slice(font_data).expect("无法加载内置的字体数据");
    Self {
      font,
      scale: PxScale::from(BUILTIN_FONT_SIZE),
      tier: FontTier::Builtin,
    }
  }

  pub fn font(&self) -> &FontArc {
    &self.font
  }

  pub fn scale(&self) -> PxScale {
    self.scale
  }

  pub fn tier(&self) -> FontTier {
    self.tier
  }
}
