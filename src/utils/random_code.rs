//! 教室加入代码生成
//!
//! 6 位字符，从 62 个字母数字符号中均匀抽取。调用方在持久化前
//! 检查现有代码集合并在碰撞时重试，数据库唯一约束兜底并发竞争。

use rand::Rng;

const CODE_LEN: usize = 6;
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// 生成一个 6 位加入代码
pub fn generate_classroom_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// 生成一个与已有集合不冲突的加入代码
///
/// 重试无上限：62^6 的空间下连续碰撞的概率随教室数量保持极低。
pub fn generate_unique_classroom_code<F>(mut exists: F) -> String
where
    F: FnMut(&str) -> bool,
{
    loop {
        let code = generate_classroom_code();
        if !exists(&code) {
            return code;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_code_shape() {
        for _ in 0..100 {
            let code = generate_classroom_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_ten_thousand_codes_unique_against_live_set() {
        // 模拟创建路径：每个新代码都与之前生成的全部代码比对
        let mut seen: HashSet<String> = HashSet::new();
        for _ in 0..10_000 {
            let code = generate_unique_classroom_code(|c| seen.contains(c));
            assert!(seen.insert(code), "duplicate code escaped the retry loop");
        }
        assert_eq!(seen.len(), 10_000);
    }

    #[test]
    fn test_retry_skips_colliding_codes() {
        // exists 前两次返回 true，第三次放行
        let mut calls = 0;
        let code = generate_unique_classroom_code(|_| {
            calls += 1;
            calls <= 2
        });
        assert_eq!(calls, 3);
        assert_eq!(code.len(), 6);
    }
}
