// 该文件是 Danqing （丹青叠彩） 项目的一部分。
// src/catalog.rs - 类别目录
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

/// 未知类别的固定回退名称
const FALLBACK_LABEL: &str = "Unknown";

/// COCO 90 编号类别表。编号按升序排列，其中 12、26、29、30、45、
/// 66、68、69、71、83 等编号在该数据集中空缺。
const COCO_LABELS: &[(u32, &str)] = &[
  (1, "person"),
  (2, "bicycle"),
  (3, "car"),
  (4, "motorcycle"),
  (5, "airplane"),
  (6, "bus"),
  (7, "train"),
  (8, "truck"),
  (9, "boat"),
  (10, "traffic light"),
  (11, "fire hydrant"),
  (13, "stop sign"),
  (14, "parking meter"),
  (15, "bench"),
  (16, "bird"),
  (17, "cat"),
  (18, "dog"),
  (19, "horse"),
  (20, "sheep"),
  (21, "cow"),
  (22, "elephant"),
  (23, "bear"),
  (24, "zebra"),
  (25, "giraffe"),
  (27, "backpack"),
  (28, "umbrella"),
  (31, "handbag"),
  (32, "tie"),
  (33, "suitcase"),
  (34, "frisbee"),
  (35, "skis"),
  (36, "snowboard"),
  (37, "sports ball"),
  (38, "kite"),
  (39, "baseball bat"),
  (40, "baseball glove"),
  (41, "skateboard"),
  (42, "surfboard"),
  (43, "tennis racket"),
  (44, "bottle"),
  (46, "wine glass"),
  (47, "cup"),
  (48, "fork"),
  (49, "knife"),
  (50, "spoon"),
  (51, "bowl"),
  (52, "banana"),
  (53, "apple"),
  (54, "sandwich"),
  (55, "orange"),
  (56, "broccoli"),
  (57, "carrot"),
  (58, "hot dog"),
  (59, "pizza"),
  (60, "donut"),
  (61, "cake"),
  (62, "chair"),
  (63, "couch"),
  (64, "potted plant"),
  (65, "bed"),
  (67, "dining table"),
  (70, "toilet"),
  (72, "tv"),
  (73, "laptop"),
  (74, "mouse"),
  (75, "remote"),
  (76, "keyboard"),
  (77, "cell phone"),
  (78, "microwave"),
  (79, "oven"),
  (80, "toaster"),
  (81, "sink"),
  (82, "refrigerator"),
  (84, "book"),
  (85, "clock"),
  (86, "vase"),
  (87, "scissors"),
  (88, "teddy bear"),
  (89, "hair drier"),
  (90, "toothbrush"),
];

/// 类别目录：类别编号到显示名称的不可变映射。
/// 进程启动时构造一次，显式传入渲染器，不做全局状态。
#[derive(Debug, Clone)]
pub struct ClassCatalog {
  labels: &'static [(u32, &'static str)],
  fallback: &'static str,
}

impl ClassCatalog {
  /// 标准 COCO 目录
  pub fn coco() -> Self {
    Self {
      labels: COCO_LABELS,
      fallback: FALLBACK_LABEL,
    }
  }

  /// 查询类别名称，未知编号返回固定的回退名称，永不失败
  pub fn label(&self, class_id: u32) -> &'static str {
    self
      .labels
      .binary_search_by_key(&class_id, |&(id, _)| id)
      .map(|idx| self.labels[idx].1)
      .unwrap_or(self.fallback)
  }
}
