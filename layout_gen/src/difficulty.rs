use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

pub const EASY_MAX_WORDS: usize = 8;
pub const MEDIUM_MAX_WORDS: usize = 13;

/// Coarse difficulty rating derived from word count alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}

impl Difficulty {
  pub fn from_word_count(count: usize) -> Self {
    if count <= EASY_MAX_WORDS {
      Difficulty::Easy
    } else if count <= MEDIUM_MAX_WORDS {
      Difficulty::Medium
    } else {
      Difficulty::Hard
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Difficulty::Easy => "Easy",
      Difficulty::Medium => "Medium",
      Difficulty::Hard => "Hard",
    }
  }
}

impl Display for Difficulty {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.label())
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use googletest::prelude::*;

  use super::*;

  #[gtest]
  fn test_word_count_thresholds() {
    expect_that!(Difficulty::from_word_count(5), eq(Difficulty::Easy));
    expect_that!(Difficulty::from_word_count(8), eq(Difficulty::Easy));
    expect_that!(Difficulty::from_word_count(9), eq(Difficulty::Medium));
    expect_that!(Difficulty::from_word_count(13), eq(Difficulty::Medium));
    expect_that!(Difficulty::from_word_count(14), eq(Difficulty::Hard));
  }

  #[gtest]
  fn test_labels() {
    expect_that!(Difficulty::Easy.label(), eq("Easy"));
    expect_that!(Difficulty::Hard.to_string(), eq("Hard"));
  }
}
