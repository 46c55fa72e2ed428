// 该文件是 Danqing （丹青叠彩） 项目的一部分。
// src/detection.rs - 检测结果定义
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use thiserror::Error;

/// 单个预测批次的结构化检测结果。
/// 各数组平行排列，只有前 `count` 项视为有效检测。
#[derive(Debug, Clone, Default)]
pub struct DetectionResult {
  /// 归一化边界框 [y_min, x_min, y_max, x_max]，约定取值范围 [0, 1]
  pub boxes: Vec<[f32; 4]>,
  /// 置信度，与 boxes 等长
  pub scores: Vec<f32>,
  /// 类别编号，与 boxes 等长
  pub classes: Vec<u32>,
  /// 有效检测数，允许小于数组长度
  pub count: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidDetectionResult {
  #[error("检测数组长度不一致: boxes={boxes}, scores={scores}, classes={classes}")]
  LengthMismatch {
    boxes: usize,
    scores: usize,
    classes: usize,
  },
  #[error("有效检测数超出数组长度: count={count}, len={len}")]
  CountOutOfRange { count: usize, len: usize },
}

impl DetectionResult {
  pub fn try_new(
    boxes: Vec<[f32; 4]>,
    scores: Vec<f32>,
    classes: Vec<u32>,
    count: usize,
  ) -> Result<Self, InvalidDetectionResult> {
    let result = Self {
      boxes,
      scores,
      classes,
      count,
    };
    result.validate()?;
    Ok(result)
  }

  /// 校验长度不变量。字段公开可改，绘制前必须再次校验。
  pub fn validate(&self) -> Result<(), InvalidDetectionResult> {
    if self.scores.len() != self.boxes.len() || self.classes.len() != self.boxes.len() {
      return Err(InvalidDetectionResult::LengthMismatch {
        boxes: self.boxes.len(),
        scores: self.scores.len(),
        classes: self.classes.len(),
      });
    }
    if self.count > self.boxes.len() {
      return Err(InvalidDetectionResult::CountOutOfRange {
        count: self.count,
        len: self.boxes.len(),
      });
    }
    Ok(())
  }

  /// 遍历有效检测（前 `count` 项）
  pub fn iter(&self) -> impl Iterator<Item = (&[f32; 4], f32, u32)> + '_ {
    self
      .boxes
      .iter()
      .zip(&self.scores)
      .zip(&self.classes)
      .take(self.count)
      .map(|((bbox, score), class_id)| (bbox, *score, *class_id))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn valid_result_passes_validation() {
    let result = DetectionResult::try_new(
      vec![[0.0, 0.0, 0.5, 0.5], [0.25, 0.25, 0.75, 0.75]],
      vec![0.9, 0.4],
      vec![1, 3],
      2,
    );
    assert!(result.is_ok());
  }

  #[test]
  fn count_may_be_less_than_array_length() {
    let result = DetectionResult::try_new(
      vec![[0.0, 0.0, 0.5, 0.5], [0.25, 0.25, 0.75, 0.75]],
      vec![0.9, 0.4],
      vec![1, 3],
      1,
    )
    .unwrap();
    assert_eq!(result.iter().count(), 1);
  }

  #[test]
  fn length_mismatch_is_rejected() {
    let err = DetectionResult::try_new(
      vec![[0.0, 0.0, 0.5, 0.5], [0.25, 0.25, 0.75, 0.75], [0.0, 0.0, 1.0, 1.0]],
      vec![0.9, 0.4],
      vec![1, 3, 7],
      3,
    )
    .unwrap_err();
    assert_eq!(
      err,
      InvalidDetectionResult::LengthMismatch {
        boxes: 3,
        scores: 2,
        classes: 3,
      }
    );
  }

  #[test]
  fn count_beyond_array_length_is_rejected() {
    let err =
      DetectionResult::try_new(vec![[0.0, 0.0, 1.0, 1.0]], vec![0.9], vec![1], 2).unwrap_err();
    assert_eq!(err, InvalidDetectionResult::CountOutOfRange { count: 2, len: 1 });
  }

  #[test]
  fn empty_result_is_valid() {
    assert!(DetectionResult::default().validate().is_ok());
  }
}
