//! 帖子正文与图片描述

use crate::models::StyledText;

const HEADLINE: &str = "🤖 Daily ARC-AGI puzzle !";

/// 生成帖子正文
///
/// 有日期（今日题目）时附带日期和指向题目页面的 `here` 链接。
pub fn compose_caption(puzzle_id: &str, date: Option<&str>, play_url: &str) -> StyledText {
    match date {
        Some(date) => StyledText::new()
            .text(format!(
                "{HEADLINE}\n\nDate: {date}\nPuzzle: {puzzle_id}\n\nTest your solution "
            ))
            .link("here", play_url),
        None => StyledText::new().text(format!("{HEADLINE}\n\nPuzzle: {puzzle_id}")),
    }
}

/// 图片的无障碍描述
pub fn alt_text(puzzle_id: &str) -> String {
    format!("Puzzle {puzzle_id} of ARC-AGI 2")
}
