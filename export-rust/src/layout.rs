//! Format-independent document content.
//!
//! [`compose`] turns an artifact into an ordered list of [`Block`]s. Both
//! the DOCX and the PDF writer render exactly this list, so the two formats
//! carry the same blocks in the same order.

use crate::{ExportError, ExportResult, Labels, Letterhead};
use lesson_sdk::{Artifact, ArtifactBody, CompetitiveGame, InteractiveActivity, QuestionType};

const SEPARATOR: &str = "--------------------------------------------------";
const ANSWER_RULE: &str = "__________________________________________________________________";
const OPTION_GAP: &str = "    ";
const LETTERS: usize = 26;

/// Spacing unit of [`Block::before`] and [`Block::after`]: twentieths of a
/// point, as used by WordprocessingML.
pub const TWIPS_PER_POINT: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Institution name, the largest heading.
    Title,
    /// Artifact kind and title.
    Heading,
    /// Worksheet section title.
    Subheading,
    Text,
    /// Horizontal separator under the artifact header.
    Separator,
    /// Blank line for an essay answer.
    AnswerRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Align {
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
    pub align: Align,
    pub bold: bool,
    pub italic: bool,
    /// Space above the block, in twips.
    pub before: u32,
    /// Space below the block, in twips.
    pub after: u32,
}

impl Block {
    fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            align: Align::Right,
            bold: false,
            italic: false,
            before: 0,
            after: 0,
        }
    }

    fn text(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Text, text)
    }

    fn label(text: impl Into<String>) -> Self {
        Self::text(text).bold()
    }

    fn bullet(text: &str) -> Self {
        Self::text(format!("• {text}"))
    }

    fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    fn before(mut self, twips: u32) -> Self {
        self.before = twips;
        self
    }

    fn after(mut self, twips: u32) -> Self {
        self.after = twips;
        self
    }
}

/// Letter label of the option at `index`: `0 -> 'a'`, `25 -> 'z'`.
pub fn option_label(index: usize) -> ExportResult<char> {
    u8::try_from(index)
        .ok()
        .filter(|i| usize::from(*i) < LETTERS)
        .map(|i| char::from(b'a' + i))
        .ok_or(ExportError::TooManyOptions(index.saturating_add(1)))
}

/// All options of a question on one line: `a) x    b) y    c) z`.
pub fn options_line(options: &[String]) -> ExportResult<String> {
    if options.len() > LETTERS {
        return Err(ExportError::TooManyOptions(options.len()));
    }
    let labelled = options
        .iter()
        .enumerate()
        .map(|(index, option)| Ok(format!("{}) {option}", option_label(index)?)))
        .collect::<ExportResult<Vec<_>>>()?;
    Ok(labelled.join(OPTION_GAP))
}

/// Lay out an artifact. Absent and empty optional fields produce no blocks.
pub fn compose(
    artifact: &Artifact,
    letterhead: &Letterhead,
    labels: &Labels,
) -> ExportResult<Vec<Block>> {
    let mut blocks = vec![
        Block::new(BlockKind::Title, &letterhead.institution).centered(),
        Block::label(format!("{}: {}", labels.teacher_prefix, letterhead.teacher)).centered(),
        Block::text(format!("{} - {}", letterhead.school, letterhead.location))
            .centered()
            .after(400),
        Block::new(
            BlockKind::Heading,
            format!("{}: {}", labels.kind(artifact.mode), artifact.title),
        ),
        Block::text(format!(
            "{}: {} | {}: {}",
            labels.subject, artifact.subject, labels.semester, artifact.semester
        )),
        Block::new(BlockKind::Separator, SEPARATOR).centered(),
        Block::label(labels.objective(artifact.mode)),
        Block::text(&artifact.objective),
    ];

    if !artifact.tools_needed.is_empty() {
        blocks.push(Block::label(&labels.tools).before(200));
        blocks.extend(artifact.tools_needed.iter().map(|tool| Block::bullet(tool)));
    }

    match artifact.body() {
        ArtifactBody::Activity { activities, game } => {
            push_activities(&mut blocks, activities, labels);
            if let Some(game) = game {
                push_game(&mut blocks, game, labels);
            }
        }
        ArtifactBody::Worksheet { sections } => {
            if !sections.is_empty() {
                blocks.push(Block::label(&labels.worksheet_content).before(400));
            }
            for section in sections {
                blocks.push(
                    Block::new(BlockKind::Subheading, &section.title)
                        .bold()
                        .before(300)
                        .after(200),
                );
                for (index, question) in section.questions.iter().enumerate() {
                    blocks.push(
                        Block::label(format!("{}. {}", index + 1, question.question)).before(200),
                    );
                    if let Some(options) = question.options.as_deref().filter(|o| !o.is_empty()) {
                        blocks.push(Block::text(options_line(options)?));
                    }
                    if question.kind == QuestionType::Essay {
                        blocks.push(Block::new(BlockKind::AnswerRule, ANSWER_RULE));
                        blocks.push(Block::new(BlockKind::AnswerRule, ANSWER_RULE));
                    }
                }
            }
        }
    }

    if !artifact.electronic_links.is_empty() {
        blocks.push(Block::label(&labels.links).before(400));
        for link in &artifact.electronic_links {
            blocks.push(Block::label(format!("{} ({}):", link.platform, link.tool_type)));
            blocks.push(Block::text(&link.description));
            blocks.push(
                Block::text(format!("{}: {}", labels.link_objective, link.link_to_objective))
                    .italic()
                    .after(200),
            );
        }
    }

    blocks.push(Block::label(&labels.closing).before(400));
    blocks.push(Block::text(&artifact.conclusion));

    Ok(blocks)
}

fn push_activities(blocks: &mut Vec<Block>, activities: &[InteractiveActivity], labels: &Labels) {
    if activities.is_empty() {
        return;
    }
    blocks.push(Block::label(&labels.activities).before(400));
    for activity in activities {
        blocks.push(
            Block::label(format!(
                "{} [{}]: {}",
                labels.activity, activity.category, activity.title
            ))
            .italic()
            .before(200),
        );
        blocks.push(Block::text(&activity.description));
        blocks.extend(
            activity
                .instructions
                .iter()
                .map(|instruction| Block::text(format!("- {instruction}"))),
        );
    }
}

fn push_game(blocks: &mut Vec<Block>, game: &CompetitiveGame, labels: &Labels) {
    blocks.push(Block::label(&labels.game).before(400));
    blocks.push(Block::text(format!("{}: {}", labels.game_name, game.name)));
    blocks.push(Block::text(format!(
        "{}: {}",
        labels.game_format, game.suggested_format
    )));
    blocks.extend(game.rules.iter().map(|rule| Block::bullet(rule)));
}
