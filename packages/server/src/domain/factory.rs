//! Room code generators.

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use rand::{SeedableRng, rngs::StdRng};

use super::{error::ValueObjectError, value_object::RoomCode};

/// ルームコードの生成器
///
/// 生成したコードが既存の Room と重複するかどうかは Repository 側で判定する。
pub trait RoomCodeGenerator: Send + Sync {
    fn next_code(&self) -> RoomCode;
}

/// 乱数によるルームコード生成器（本番用）
pub struct RandomRoomCodeGenerator {
    rng: Mutex<StdRng>,
}

impl RandomRoomCodeGenerator {
    /// OS の乱数でシードした生成器を作成
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// 固定シードの生成器を作成（同じシードなら同じ列を返す）
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomRoomCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomCodeGenerator for RandomRoomCodeGenerator {
    fn next_code(&self) -> RoomCode {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        RoomCode::random(&mut *rng)
    }
}

/// 決められた順にコードを返す生成器（テスト用）
///
/// 最後まで返したら先頭に戻る。
pub struct SequenceRoomCodeGenerator {
    codes: Vec<RoomCode>,
    next: AtomicUsize,
}

impl SequenceRoomCodeGenerator {
    /// # Panics
    ///
    /// `codes` が空の場合
    pub fn new(codes: Vec<RoomCode>) -> Self {
        assert!(!codes.is_empty(), "SequenceRoomCodeGenerator needs at least one code");
        Self {
            codes,
            next: AtomicUsize::new(0),
        }
    }

    pub fn from_strs(codes: &[&str]) -> Result<Self, ValueObjectError> {
        let codes = codes
            .iter()
            .map(|code| RoomCode::new(code.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(codes))
    }
}

impl RoomCodeGenerator for SequenceRoomCodeGenerator {
    fn next_code(&self) -> RoomCode {
        let index = self.next.fetch_add(1, Ordering::Relaxed) % self.codes.len();
        self.codes[index].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_generator_is_deterministic() {
        // テスト項目: 同じシードの生成器は同じコード列を返す
        // given (前提条件):
        let generator1 = RandomRoomCodeGenerator::seeded(42);
        let generator2 = RandomRoomCodeGenerator::seeded(42);

        // when (操作):
        let codes1: Vec<RoomCode> = (0..5).map(|_| generator1.next_code()).collect();
        let codes2: Vec<RoomCode> = (0..5).map(|_| generator2.next_code()).collect();

        // then (期待する結果):
        assert_eq!(codes1, codes2);
    }

    #[test]
    fn test_sequence_generator_cycles() {
        // テスト項目: SequenceRoomCodeGenerator は指定順に返し、最後まで行くと先頭に戻る
        // given (前提条件):
        let generator = SequenceRoomCodeGenerator::from_strs(&["ABCD", "WXYZ"]).unwrap();

        // when (操作):
        let codes: Vec<String> = (0..3)
            .map(|_| generator.next_code().into_string())
            .collect();

        // then (期待する結果):
        assert_eq!(codes, vec!["ABCD", "WXYZ", "ABCD"]);
    }

    #[test]
    fn test_sequence_generator_rejects_invalid_code() {
        // テスト項目: 不正な形式のコードを渡すとエラーになる
        // given (前提条件):
        let codes = ["ABCD", "abc"];

        // when (操作):
        let result = SequenceRoomCodeGenerator::from_strs(&codes);

        // then (期待する結果):
        assert!(result.is_err());
    }
}
