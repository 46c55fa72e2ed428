// 该文件是 Danqing （丹青叠彩） 项目的一部分。
// src/payload.rs - 远端预测负载解析
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use base64::Engine;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::detection::{DetectionResult, InvalidDetectionResult};

#[derive(Error, Debug)]
pub enum PayloadError {
  #[error("预测负载缺少字段: {0}")]
  MissingField(&'static str),
  #[error("字段 {0} 不是数组")]
  NotAnArray(&'static str),
  #[error("字段 {0} 含有非数值元素")]
  NotANumber(&'static str),
  #[error("第 {index} 个边界框不是 4 元数值数组")]
  MalformedBox { index: usize },
  #[error("检测结果无效: {0}")]
  Invalid(#[from] InvalidDetectionResult),
}

fn field<'a>(payload: &'a Value, key: &'static str) -> Result<&'a Value, PayloadError> {
  payload.get(key).ok_or(PayloadError::MissingField(key))
}

fn number_seq(value: &Value, key: &'static str) -> Result<Vec<f64>, PayloadError> {
  value
    .as_array()
    .ok_or(PayloadError::NotAnArray(key))?
    .iter()
    .map(|v| v.as_f64().ok_or(PayloadError::NotANumber(key)))
    .collect()
}

/// 解析远端模型返回的预测负载。
///
/// 负载键位与上游模型服务保持一致：`detection_boxes`（4 元浮点数组的序列，
/// [y_min, x_min, y_max, x_max]）、`detection_scores`、`detection_classes`、
/// `num_detections`。类别与数量字段按上游惯例以浮点数下发，这里强制转为整数。
pub fn parse_detect_payload(payload: &Value) -> Result<DetectionResult, PayloadError> {
  let raw_boxes = field(payload, "detection_boxes")?
    .as_array()
    .ok_or(PayloadError::NotAnArray("detection_boxes"))?;

  let mut boxes = Vec::with_capacity(raw_boxes.len());
  for (index, value) in raw_boxes.iter().enumerate() {
    let coords =
      number_seq(value, "detection_boxes").map_err(|_| PayloadError::MalformedBox { index })?;
    let &[ymin, xmin, ymax, xmax] = &coords[..] else {
      return Err(PayloadError::MalformedBox { index });
    };
    boxes.push([ymin as f32, xmin as f32, ymax as f32, xmax as f32]);
  }

  let scores = number_seq(field(payload, "detection_scores")?, "detection_scores")?
    .iter()
    .map(|&s| s as f32)
    .collect();
  let classes = number_seq(field(payload, "detection_classes")?, "detection_classes")?
    .iter()
    .map(|&c| c as u32)
    .collect();
  let count = field(payload, "num_detections")?
    .as_f64()
    .ok_or(PayloadError::NotANumber("num_detections"))? as usize;

  debug!("解析预测负载: {} 个候选框, 有效数 {}", boxes.len(), count);

  Ok(DetectionResult::try_new(boxes, scores, classes, count)?)
}

/// 将渲染产物编码为 base64 文本，供应用层回传调用方
pub fn to_base64(jpeg: &[u8]) -> String {
  base64::engine::general_purpose::STANDARD.encode(jpeg)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn parses_upstream_payload_shape() {
    let payload = json!({
      "detection_boxes": [[0.125, 0.25, 0.5, 0.75], [0.0, 0.0, 1.0, 1.0]],
      "detection_scores": [0.875, 0.25],
      "detection_classes": [1.0, 18.0],
      "num_detections": 2.0,
    });
    let result = parse_detect_payload(&payload).unwrap();
    assert_eq!(result.count, 2);
    assert_eq!(result.classes, vec![1, 18]);
    assert_eq!(result.scores, vec![0.875, 0.25]);
    assert_eq!(result.boxes[0], [0.125, 0.25, 0.5, 0.75]);
  }

  #[test]
  fn integer_numbers_are_accepted_as_well() {
    let payload = json!({
      "detection_boxes": [[0, 0, 1, 1]],
      "detection_scores": [1],
      "detection_classes": [3],
      "num_detections": 1,
    });
    let result = parse_detect_payload(&payload).unwrap();
    assert_eq!(result.classes, vec![3]);
    assert_eq!(result.count, 1);
  }

  #[test]
  fn missing_field_is_reported() {
    let payload = json!({
      "detection_boxes": [],
      "detection_scores": [],
      "num_detections": 0,
    });
    let err = parse_detect_payload(&payload).unwrap_err();
    assert!(matches!(err, PayloadError::MissingField("detection_classes")));
  }

  #[test]
  fn malformed_box_is_reported() {
    let payload = json!({
      "detection_boxes": [[0.0, 0.0, 1.0]],
      "detection_scores": [0.5],
      "detection_classes": [1],
      "num_detections": 1,
    });
    let err = parse_detect_payload(&payload).unwrap_err();
    assert!(matches!(err, PayloadError::MalformedBox { index: 0 }));
  }

  #[test]
  fn mismatched_arrays_surface_invalid_result() {
    let payload = json!({
      "detection_boxes": [[0.0, 0.0, 1.0, 1.0], [0.0, 0.0, 0.5, 0.5], [0.0, 0.0, 0.25, 0.25]],
      "detection_scores": [0.9, 0.8],
      "detection_classes": [1, 2, 3],
      "num_detections": 3,
    });
    let err = parse_detect_payload(&payload).unwrap_err();
    assert!(matches!(err, PayloadError::Invalid(_)));
  }

  #[test]
  fn base64_round_trips() {
    let bytes = [0xffu8, 0xd8, 0xff, 0xe0, 0x00, 0x10];
    let encoded = to_base64(&bytes);
    let decoded = base64::engine::general_purpose::STANDARD
      .decode(encoded)
      .unwrap();
    assert_eq!(decoded, bytes);
  }
}
