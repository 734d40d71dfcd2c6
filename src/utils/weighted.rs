//! 累积权重抽样
//!
//! 权重无需归一化到 100. 抽样区间被截断为 `min(total, window)`,
//! 因此当权重总和超过 `window` 时, 排在后面的奖品可能永远抽不到.

use rand::Rng;

/// 默认抽样区间上限
pub const DEFAULT_WEIGHT_WINDOW: f64 = 100.0;

fn effective_weight(w: f64) -> f64 {
    if w.is_finite() && w > 0.0 { w } else { 0.0 }
}

/// 按权重选出一个下标.
///
/// - 空输入返回 `None`
/// - 所有权重为 0 时等概率选择
/// - 否则在 `[0, min(total, window))` 中取随机数 `r`, 返回第一个满足
///   `r <= 累积权重` 的下标
/// - 浮点累加误差导致没有命中时, 返回最后一个下标
///
/// 负数与 NaN 权重按 0 处理.
pub fn pick_index<R: Rng + ?Sized>(weights: &[f64], window: f64, rng: &mut R) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }

    let total: f64 = weights.iter().copied().map(effective_weight).sum();
    if total <= 0.0 {
        return Some(rng.gen_range(0..weights.len()));
    }

    let window = if window.is_finite() && window > 0.0 {
        window
    } else {
        DEFAULT_WEIGHT_WINDOW
    };
    let limit = if total.is_finite() { total.min(window) } else { window };
    let r = rng.gen_range(0.0..limit);

    let mut cumulative = 0.0;
    for (idx, w) in weights.iter().copied().map(effective_weight).enumerate() {
        cumulative += w;
        if r <= cumulative {
            return Some(idx);
        }
    }

    Some(weights.len() - 1)
}
