//! セッション状態モジュール
//!
//! 1回の入力セッション分の状態（入力値・検出結果・送信済みフラグ）を保持する。
//! 状態は各ハンドラに可変参照で渡し、セッション終了とともに破棄する。

use serde::Serialize;
use std::path::PathBuf;

/// 1回分の記録内容
#[derive(Debug, Clone, Default, Serialize)]
pub struct Submission {
    /// 車両番号
    pub truck_text: String,
    /// パレット管理票の番号
    pub document_text: String,
    /// 段数（積み重ね数）
    pub layer_count: u32,
    /// 正面検出数
    pub front_count: u32,
    /// 側面検出数
    pub side_count: u32,
    /// 計算合計（正面 × 段数）
    pub total_pallets: u32,
    /// ユーザー確認済みの数
    pub confirmed_count: u32,
    /// 正面画像（一時JPEGのパス）
    pub front_image: Option<PathBuf>,
    /// 側面画像（一時JPEGのパス）
    pub side_image: Option<PathBuf>,
    /// 記録時刻 "%Y-%m-%d %H:%M:%S"
    pub timestamp: String,
}

/// セッション状態（入力内容 + 送信ガード）
#[derive(Debug, Default)]
pub struct Session {
    pub submission: Submission,
    saved: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存処理の開始を試みる。
    ///
    /// 初回のみ true。フラグはネットワーク呼び出しの前に立て、
    /// 保存が失敗してもリセットしない（同一セッション内の再送を防ぐ）。
    pub fn try_begin_save(&mut self) -> bool {
        if self.saved {
            return false;
        }
        self.saved = true;
        true
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }
}

/// 数値入力のパース。空白はトリム、非数値は None。
pub fn parse_count(input: &str) -> Option<u32> {
    input.trim().parse().ok()
}

/// 合計 = 正面検出数 × 段数。u32を超える入力は上限に丸める。
pub fn compute_total(front_count: u32, layer_count: u32) -> u32 {
    front_count.saturating_mul(layer_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_valid() {
        assert_eq!(parse_count("3"), Some(3));
        assert_eq!(parse_count(" 12 "), Some(12));
        assert_eq!(parse_count("0"), Some(0));
    }

    #[test]
    fn test_parse_count_invalid() {
        assert_eq!(parse_count("abc"), None);
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("3.5"), None);
        assert_eq!(parse_count("-1"), None);
    }

    #[test]
    fn test_compute_total() {
        assert_eq!(compute_total(4, 3), 12);
        assert_eq!(compute_total(0, 5), 0);
        assert_eq!(compute_total(7, 0), 0);
    }

    #[test]
    fn test_compute_total_saturates() {
        // 過大な段数入力でもパニックせず上限に丸める
        assert_eq!(compute_total(2, u32::MAX), u32::MAX);
        assert_eq!(compute_total(u32::MAX, u32::MAX), u32::MAX);
    }

    #[test]
    fn test_guard_one_shot() {
        let mut session = Session::new();
        assert!(!session.is_saved());
        assert!(session.try_begin_save());
        // 保存結果に関わらず2回目以降は常に拒否
        assert!(!session.try_begin_save());
        assert!(!session.try_begin_save());
        assert!(session.is_saved());
    }
}
