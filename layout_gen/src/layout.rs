use std::{
  cmp::Reverse,
  collections::HashMap,
  fmt::{self, Display, Formatter},
};

use bitcode::{Decode, Encode};
use itertools::Itertools;
use serde::{Deserialize, Serialize, Serializer};
use util::{
  error::{SilangError, SilangResult},
  grid::Grid,
  pos::{Diff, Pos},
};

/// Side length of the square working lattice. Placement never has to worry
/// about running off the edge as long as this stays at least twice the
/// longest word the validator admits; the result is cropped to the occupied
/// bounding box afterwards.
pub const LATTICE_SIZE: u32 = 50;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Encode, Decode, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  Across,
  Down,
}

impl Direction {
  /// Unit step along the word.
  pub const fn unit(&self) -> Diff {
    match self {
      Direction::Across => Diff::DX,
      Direction::Down => Diff::DY,
    }
  }

  /// Unit step perpendicular to the word.
  pub const fn cross(&self) -> Diff {
    match self {
      Direction::Across => Diff::DY,
      Direction::Down => Diff::DX,
    }
  }
}

impl Display for Direction {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}",
      match self {
        Direction::Across => "across",
        Direction::Down => "down",
      }
    )
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordInput {
  pub text: String,
  pub clue: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedWord {
  pub text: String,
  pub clue: String,
  pub direction: Direction,
  pub start_x: i32,
  pub start_y: i32,
  pub number: u32,
}

impl PlacedWord {
  pub fn start(&self) -> Pos {
    Pos { x: self.start_x, y: self.start_y }
  }

  pub fn letter_positions(&self) -> impl Iterator<Item = (char, Pos)> + '_ {
    let step = self.direction.unit();
    self
      .text
      .chars()
      .enumerate()
      .map(move |(idx, c)| (c, self.start() + step * idx as i32))
  }
}

/// A finished layout: the cropped letter grid, every placed word with its
/// clue number, and the words the greedy pass could not fit.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedGrid {
  #[serde(serialize_with = "serialize_letters")]
  pub grid: Grid<Option<char>>,
  pub words: Vec<PlacedWord>,
  pub width: u32,
  pub height: u32,
  pub unplaced_words: Vec<String>,
}

impl Display for GeneratedGrid {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.grid.map(|&tile| tile.unwrap_or('.')))
  }
}

/// Serializes the letter grid as rows of single-character strings, with ""
/// for cells outside every word, the shape the web consumers expect.
fn serialize_letters<S: Serializer>(
  grid: &Grid<Option<char>>,
  serializer: S,
) -> Result<S::Ok, S::Error> {
  (0..grid.height())
    .map(|y| {
      grid
        .iter_row(y)
        .map(|tile| tile.map(String::from).unwrap_or_default())
        .collect()
    })
    .collect::<Vec<Vec<String>>>()
    .serialize(serializer)
}

#[derive(Clone, Debug, Default)]
struct Cell {
  letter: Option<char>,
  word_indices: Vec<usize>,
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
  pos: Pos,
  direction: Direction,
  intersections: u32,
}

/// Working state for a single generation pass. Owns its lattice; nothing is
/// shared across calls.
struct Layout {
  lattice: Grid<Cell>,
  placed: Vec<PlacedWord>,
  unplaced: Vec<String>,
}

impl Layout {
  fn new() -> Self {
    Self {
      lattice: Grid::new(LATTICE_SIZE, LATTICE_SIZE),
      placed: Vec::new(),
      unplaced: Vec::new(),
    }
  }

  fn letter(&self, pos: Pos) -> Option<char> {
    self.lattice.get(pos).and_then(|cell| cell.letter)
  }

  /// Off-grid cells count as open.
  fn is_open(&self, pos: Pos) -> bool {
    self.letter(pos).is_none()
  }

  fn fits(&self, word: &str, start: Pos, direction: Direction) -> bool {
    let step = direction.unit();
    let cross = direction.cross();
    let len = word.chars().count() as i32;

    if !self.lattice.in_bounds(start) || !self.lattice.in_bounds(start + step * (len - 1)) {
      return false;
    }

    // The word may not extend another word end-to-end.
    if !self.is_open(start - step) || !self.is_open(start + step * len) {
      return false;
    }

    word.chars().enumerate().all(|(idx, c)| {
      let pos = start + step * idx as i32;
      match self.letter(pos) {
        // Crossing an existing word is only allowed on a matching letter.
        Some(existing) => existing == c,
        // A newly occupied cell may not sit flush against a parallel word.
        None => self.is_open(pos + cross) && self.is_open(pos - cross),
      }
    })
  }

  fn intersection_count(&self, word: &str, start: Pos, direction: Direction) -> u32 {
    let step = direction.unit();
    word
      .chars()
      .enumerate()
      .filter(|&(idx, c)| self.letter(start + step * idx as i32) == Some(c))
      .count() as u32
  }

  fn candidate_at(&self, word: &str, start: Pos, direction: Direction) -> Option<Candidate> {
    self.fits(word, start, direction).then(|| Candidate {
      pos: start,
      direction,
      intersections: self.intersection_count(word, start, direction),
    })
  }

  /// The feasible placement with the most intersections. Candidates are
  /// scanned by word letter index, then lattice row, then column, across
  /// before down; on equal intersection counts the first one found wins, so
  /// repeated runs produce identical layouts.
  fn best_placement(&self, word: &str) -> Option<Candidate> {
    word
      .chars()
      .enumerate()
      .flat_map(move |(idx, c)| {
        self
          .lattice
          .positions()
          .filter(move |&pos| self.letter(pos) == Some(c))
          .flat_map(move |pos| {
            let offset = idx as i32;
            let across = self.candidate_at(word, pos - Diff::DX * offset, Direction::Across);
            let down = self.candidate_at(word, pos - Diff::DY * offset, Direction::Down);
            across.into_iter().chain(down)
          })
      })
      .fold(None, |best: Option<Candidate>, candidate| match best {
        Some(best) if best.intersections >= candidate.intersections => Some(best),
        _ => Some(candidate),
      })
  }

  fn write_word(&mut self, input: &WordInput, text: String, candidate: Candidate) -> SilangResult {
    let placed = PlacedWord {
      text,
      clue: input.clue.clone(),
      direction: candidate.direction,
      start_x: candidate.pos.x,
      start_y: candidate.pos.y,
      number: 0,
    };

    let index = self.placed.len();
    for (c, pos) in placed.letter_positions().collect_vec() {
      let cell = self
        .lattice
        .get_mut(pos)
        .ok_or_else(|| SilangError::Internal(format!("Position {pos} is out of bounds")))?;
      cell.letter = Some(c);
      cell.word_indices.push(index);
    }

    self.placed.push(placed);
    Ok(())
  }

  fn seed(&mut self, input: &WordInput) -> SilangResult {
    let text = input.text.to_uppercase();
    let center = (LATTICE_SIZE / 2) as i32;
    let start = Pos {
      x: center - text.chars().count() as i32 / 2,
      y: center,
    };
    let candidate = self
      .candidate_at(&text, start, Direction::Across)
      .ok_or_else(|| SilangError::Internal("Could not place seed word".to_owned()))?;
    self.write_word(input, text, candidate)
  }

  fn place(&mut self, input: &WordInput) -> SilangResult {
    let text = input.text.to_uppercase();
    match self.best_placement(&text) {
      Some(candidate) => self.write_word(input, text, candidate),
      None => {
        self.unplaced.push(input.text.clone());
        Ok(())
      }
    }
  }

  fn bounding_box(&self) -> SilangResult<(Pos, Pos)> {
    self
      .lattice
      .positions()
      .filter(|&pos| self.letter(pos).is_some())
      .fold(None, |bounds, pos| match bounds {
        None => Some((pos, pos)),
        Some((min, max)) => Some((
          Pos { x: min.x.min(pos.x), y: min.y.min(pos.y) },
          Pos { x: max.x.max(pos.x), y: max.y.max(pos.y) },
        )),
      })
      .ok_or_else(|| SilangError::Internal("No occupied cells to crop".to_owned()).into())
  }

  fn into_generated(self) -> SilangResult<GeneratedGrid> {
    let (min, max) = self.bounding_box()?;
    let offset = min - Pos::zero();
    let width = (max.x - min.x + 1) as u32;
    let height = (max.y - min.y + 1) as u32;

    let letters = (0..height as i32)
      .flat_map(|y| (0..width as i32).map(move |x| Pos { x, y }))
      .map(|pos| self.letter(pos + offset))
      .collect();
    let grid = Grid::from_vec(letters, width, height)?;

    let numbers: HashMap<Pos, u32> = self
      .placed
      .iter()
      .map(|word| word.start() - offset)
      .sorted_by_key(|pos| (pos.y, pos.x))
      .fold(HashMap::new(), |mut numbers, start| {
        let next = numbers.len() as u32 + 1;
        numbers.entry(start).or_insert(next);
        numbers
      });

    let words = self
      .placed
      .into_iter()
      .map(|word| -> SilangResult<PlacedWord> {
        let start = word.start() - offset;
        let number = *numbers
          .get(&start)
          .ok_or_else(|| SilangError::Internal(format!("No clue number for start cell {start}")))?;
        Ok(PlacedWord {
          start_x: start.x,
          start_y: start.y,
          number,
          ..word
        })
      })
      .collect::<SilangResult<Vec<_>>>()?;

    Ok(GeneratedGrid {
      grid,
      words,
      width,
      height,
      unplaced_words: self.unplaced,
    })
  }
}

/// Generates a crossword layout from `words`.
///
/// The longest word is placed across the center of the lattice; every other
/// word, longest first, is placed on the crossing with the most shared
/// letters. Words that cannot cross anything end up in
/// [`GeneratedGrid::unplaced_words`] rather than failing the call; whether a
/// partial layout is acceptable is the caller's policy. Input is expected to
/// have passed [`crate::word_list::validate`]; no deduplication happens here.
pub fn generate(words: &[WordInput]) -> SilangResult<GeneratedGrid> {
  if words.len() < 2 {
    return Err(
      SilangError::Input("Need at least 2 words to generate a crossword".to_owned()).into(),
    );
  }

  let sorted = words
    .iter()
    .sorted_by_key(|word| Reverse(word.text.chars().count()))
    .collect_vec();

  let mut layout = Layout::new();
  layout.seed(sorted[0])?;
  for word in &sorted[1..] {
    layout.place(word)?;
  }
  layout.into_generated()
}
