use std::collections::HashSet;

use crate::layout::WordInput;

pub const MIN_WORDS: usize = 5;
pub const MAX_WORDS: usize = 15;

/// Checks a word list before layout generation, collecting every violation
/// instead of stopping at the first so a caller can show them all at once.
/// The generator assumes these checks have passed and does not repeat them.
pub fn validate(words: &[WordInput]) -> Vec<String> {
  let mut errors = Vec::new();

  if words.len() < MIN_WORDS {
    errors.push(format!("At least {MIN_WORDS} words are required"));
  }
  if words.len() > MAX_WORDS {
    errors.push(format!("At most {MAX_WORDS} words are allowed"));
  }

  let mut seen = HashSet::new();
  for word in words {
    if word.text.trim().is_empty() {
      errors.push("Words may not be empty".to_owned());
      continue;
    }

    if word.clue.trim().is_empty() {
      errors.push(format!("Clue for \"{}\" may not be empty", word.text));
    }

    if !word.text.chars().all(|c| c.is_ascii_alphabetic()) {
      errors.push(format!("\"{}\" may only contain letters", word.text));
    }

    if !seen.insert(word.text.to_uppercase()) {
      errors.push(format!("Word \"{}\" is a duplicate", word.text));
    }
  }

  errors
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use googletest::prelude::*;

  use super::*;

  fn word(text: &str, clue: &str) -> WordInput {
    WordInput {
      text: text.to_owned(),
      clue: clue.to_owned(),
    }
  }

  fn valid_words() -> Vec<WordInput> {
    [
      ("HARIMAU", "Kucing besar bergaris dari Sumatera"),
      ("GAJAH", "Mamalia besar dengan belalai"),
      ("ORANGUTAN", "Primata berambut merah dari Kalimantan"),
      ("KOMODO", "Kadal raksasa dari Nusa Tenggara"),
      ("BADAK", "Hewan bertanduk yang hampir punah"),
    ]
    .into_iter()
    .map(|(text, clue)| word(text, clue))
    .collect()
  }

  #[gtest]
  fn test_valid_list_passes() {
    expect_that!(validate(&valid_words()), empty());
  }

  #[gtest]
  fn test_rejects_too_few_words() {
    let words = valid_words()[..4].to_vec();
    expect_that!(
      validate(&words),
      container_eq(["At least 5 words are required".to_owned()])
    );
  }

  #[gtest]
  fn test_rejects_too_many_words() {
    let words: Vec<_> = ('A'..='P')
      .map(|c| word(&format!("WORD{c}"), "clue"))
      .collect();
    expect_that!(
      validate(&words),
      container_eq(["At most 15 words are allowed".to_owned()])
    );
  }

  #[gtest]
  fn test_rejects_empty_text_and_skips_other_checks() {
    let mut words = valid_words();
    words[0] = word("  ", "");
    expect_that!(
      validate(&words),
      container_eq(["Words may not be empty".to_owned()])
    );
  }

  #[gtest]
  fn test_rejects_empty_clue() {
    let mut words = valid_words();
    words[1].clue = " ".to_owned();
    expect_that!(
      validate(&words),
      elements_are![contains_substring("Clue for \"GAJAH\"")]
    );
  }

  #[gtest]
  fn test_rejects_non_alphabetic_text() {
    let mut words = valid_words();
    words[2].text = "ORANGUTAN2".to_owned();
    expect_that!(
      validate(&words),
      elements_are![eq("\"ORANGUTAN2\" may only contain letters")]
    );
  }

  #[gtest]
  fn test_rejects_duplicates_case_insensitively() {
    let mut words = valid_words();
    words[4].text = "Harimau".to_owned();
    expect_that!(
      validate(&words),
      elements_are![eq("Word \"Harimau\" is a duplicate")]
    );
  }

  #[gtest]
  fn test_collects_every_violation() {
    let words = vec![
      word("HARIMAU", "Kucing besar"),
      word("GAJAH1", "Mamalia besar"),
      word("harimau", "Kucing besar lagi"),
    ];
    let errors = validate(&words);
    expect_that!(errors, len(eq(3)));
    expect_that!(
      errors,
      unordered_elements_are![
        eq("At least 5 words are required"),
        eq("\"GAJAH1\" may only contain letters"),
        eq("Word \"harimau\" is a duplicate"),
      ]
    );
  }
}
