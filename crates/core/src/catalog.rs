//! Built-in workshop content.
//!
//! Campus ships its course material statically: two days of a generative-AI
//! workshop, each a short run of markdown sections with a quiz at the end of
//! every section. Content goes through the validated constructors so a
//! mistake here surfaces as an error at composition time, not as a broken
//! page at runtime.

use thiserror::Error;

use crate::model::{
    Course, CourseError, CourseId, ParseIdError, Question, QuestionError, Section, SectionError,
    SectionId,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error(transparent)]
    Id(#[from] ParseIdError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Section(#[from] SectionError),
    #[error(transparent)]
    Course(#[from] CourseError),
}

/// Builds the two workshop courses.
///
/// # Errors
///
/// Returns `CatalogError` if any built-in section or question fails
/// validation.
pub fn workshop_courses() -> Result<Vec<Course>, CatalogError> {
    Ok(vec![day_one()?, day_two()?])
}

fn question(prompt: &str, options: &[&str], correct: usize) -> Result<Question, CatalogError> {
    let options = options.iter().map(|o| (*o).to_string()).collect();
    Ok(Question::new(prompt, options, correct)?)
}

fn section(
    id: &str,
    title: &str,
    body: &str,
    questions: Vec<Question>,
) -> Result<Section, CatalogError> {
    Ok(Section::new(SectionId::new(id)?, title, body, questions)?)
}

fn day_one() -> Result<Course, CatalogError> {
    let intro = section(
        "intro-to-genai",
        "Welcome to Generative AI",
        r#"Generative AI describes models that produce new content — text,
images, audio, code — instead of only classifying what they are given.
A spam filter decides *which* bucket a mail belongs to; a generative model
writes the mail.

## What changed

Three things came together: transformer architectures that scale, training
corpora of internet size, and enough compute to combine the two. The result
is a family of general-purpose models you steer with plain language.

## What you will do today

- Understand what a large language model actually computes
- Learn the prompting patterns that make outputs predictable
- Pass each section's quiz to unlock the next one

Work through the sections in order; each one builds on the last."#,
        vec![
            question(
                "What distinguishes a generative model from a discriminative one?",
                &[
                    "It produces new content rather than assigning labels",
                    "It always runs on a GPU",
                    "It never makes mistakes",
                    "It only works on images",
                ],
                0,
            )?,
            question(
                "Which of these is NOT one of the ingredients behind the current wave of generative AI?",
                &[
                    "Transformer architectures",
                    "Internet-scale training data",
                    "Large amounts of compute",
                    "Quantum processors",
                ],
                3,
            )?,
            question(
                "How do you steer a general-purpose generative model?",
                &[
                    "By recompiling it",
                    "With plain-language instructions",
                    "By editing its training data",
                    "You cannot steer it",
                ],
                1,
            )?,
        ],
    )?;

    let llms = section(
        "how-llms-work",
        "How Large Language Models Work",
        r#"A large language model is, at its core, a next-token predictor.
Text is split into **tokens** (word fragments), and the model repeatedly
answers one question: given everything so far, which token is likely next?
Sampling from those likelihoods, one token at a time, is what produces
paragraphs that read as if they were planned.

## Training vs. inference

Training fixes the model's weights against a huge corpus and happens once,
at great cost. Inference — what you trigger with every prompt — only *reads*
those weights. The model does not learn from your conversation.

## The context window

Everything the model can consider must fit into its context window: your
prompt, the conversation so far, any documents you paste. What falls outside
the window does not exist for the model, which is why long chats "forget"
their beginning."#,
        vec![
            question(
                "What does a language model fundamentally predict?",
                &[
                    "The next token given the tokens so far",
                    "The user's intent",
                    "Whether a statement is true",
                    "The best data source to cite",
                ],
                0,
            )?,
            question(
                "When does a deployed model update its weights?",
                &[
                    "After every conversation",
                    "Once per day",
                    "During inference, gradually",
                    "It doesn't — weights are fixed at training time",
                ],
                3,
            )?,
            question(
                "Why do very long chats lose track of their beginning?",
                &[
                    "The model gets bored",
                    "Early messages fall outside the context window",
                    "Tokens expire after an hour",
                    "The server restarts between messages",
                ],
                1,
            )?,
        ],
    )?;

    let prompting = section(
        "prompting-basics",
        "Prompting Fundamentals",
        r#"Prompting is interface design in prose. The model will answer
almost anything; the craft is getting the *shape* of answer you need,
reliably.

## The four parts of a solid prompt

1. **Role** — who the model should act as ("You are a careful editor…")
2. **Instruction** — the task, stated directly
3. **Context** — the material to work on, clearly delimited
4. **Format** — what the output must look like (a table, JSON, three bullets)

## Zero-shot vs. few-shot

Asking directly is *zero-shot*. Showing one or two worked examples before
the real input — *few-shot* prompting — is the single cheapest way to pin
down format and tone.

Treat the first answer as a draft: tighten the instruction, add a
counter-example, iterate. Small prompt edits move outputs a lot."#,
        vec![
            question(
                "Which element tells the model what its output must look like?",
                &["Role", "Instruction", "Context", "Format"],
                3,
            )?,
            question(
                "What is few-shot prompting?",
                &[
                    "Asking several models the same question",
                    "Including worked examples in the prompt",
                    "Sending the same prompt repeatedly",
                    "Keeping prompts under ten words",
                ],
                1,
            )?,
            question(
                "A prompt's first answer misses the mark. What is the recommended move?",
                &[
                    "Switch to a bigger model immediately",
                    "Report a bug",
                    "Refine the instruction and iterate",
                    "Accept it — outputs are not controllable",
                ],
                2,
            )?,
        ],
    )?;

    Ok(Course::new(
        CourseId::new("day1")?,
        "Day 1 — Foundations",
        "What generative models are, how LLMs actually work, and the prompting patterns that make them dependable.",
        vec![intro, llms, prompting],
    )?)
}

fn day_two() -> Result<Course, CatalogError> {
    let images = section(
        "image-generation",
        "Images and Multimodal Models",
        r#"Text-to-image models grew out of **diffusion**: start from noise,
then denoise step by step toward an image that matches the prompt. The same
idea now powers video and audio generation.

## Prompting for images

Image prompts reward concreteness: subject, style, lighting, composition,
medium. "A lighthouse" is a lottery ticket; "a lighthouse at dusk, long
exposure, film photograph" is a brief.

## Multimodal input

Current flagship models also *read* images: hand one a whiteboard photo and
ask for the action items, or a chart and ask what changed. The boundary
between text and image tooling is dissolving into one conversational
surface."#,
        vec![
            question(
                "What process underlies most modern image generators?",
                &[
                    "Iterative denoising (diffusion)",
                    "Template lookup",
                    "Copying the nearest training image",
                    "Ray tracing",
                ],
                0,
            )?,
            question(
                "Which image prompt is most likely to produce a usable result on the first try?",
                &[
                    "\"something nice\"",
                    "\"a lighthouse\"",
                    "\"a lighthouse at dusk, long exposure, film photograph\"",
                    "\"画\"",
                ],
                2,
            )?,
            question(
                "What does 'multimodal' mean for a model?",
                &[
                    "It runs in multiple regions",
                    "It accepts and reasons over more than one kind of input, such as text and images",
                    "It has several pricing tiers",
                    "It answers in multiple languages",
                ],
                1,
            )?,
        ],
    )?;

    let at_work = section(
        "ai-at-work",
        "Putting AI to Work",
        r#"The chat window is the demo; the API is the product. Everything you
did yesterday by hand — drafting, summarizing, extracting — can run inside
your own tools once you call a model programmatically.

## The shape of an integration

Most integrations are one loop: gather input, build a prompt from a
template, call the model, validate the output, act on it. Validation is the
step teams skip and regret — treat model output like user input.

## Grounding with your own data

Models do not know your wiki. The standard fix is retrieval: search your
documents for passages relevant to the question and put them *in the
prompt*. The model answers from the supplied passages instead of from
memory."#,
        vec![
            question(
                "What turns a chat-window workflow into a product feature?",
                &[
                    "Calling the model through an API inside your own tools",
                    "A faster keyboard",
                    "Taking screenshots of answers",
                    "Upgrading the office Wi-Fi",
                ],
                0,
            )?,
            question(
                "Which step do integration teams most often skip, according to this section?",
                &[
                    "Gathering input",
                    "Building the prompt",
                    "Validating the model's output",
                    "Calling the API",
                ],
                2,
            )?,
            question(
                "How does retrieval ground a model in private data?",
                &[
                    "By retraining the model nightly",
                    "By placing relevant passages into the prompt",
                    "By giving the model database credentials",
                    "By increasing the temperature",
                ],
                1,
            )?,
        ],
    )?;

    let responsible = section(
        "responsible-ai",
        "Responsible AI",
        r#"A language model optimizes for plausible text, not true text.
When it lacks the facts it will still produce fluent, confident prose —
a failure mode usually called **hallucination**. Fluency is not evidence.

## Working rules

- Verify anything load-bearing: names, numbers, quotes, citations, code
- Never paste confidential data into tools that are not approved for it
- Expect bias: models inherit the skews of their training data
- Keep a human accountable for every consequential output

## The habit that matters

Treat the model as a brilliant, tireless intern with no stake in being
right. Delegate generously, review everything, and sign your own name only
to work you have checked."#,
        vec![
            question(
                "What is a hallucination in the context of language models?",
                &[
                    "A rendering glitch in the UI",
                    "Fluent output that is factually wrong",
                    "A model refusing to answer",
                    "An unusually long response",
                ],
                1,
            )?,
            question(
                "Which of these belongs in every AI working agreement?",
                &[
                    "Verify load-bearing facts before using them",
                    "Trust outputs that sound confident",
                    "Share customer data freely to improve answers",
                    "Let the model approve its own output",
                ],
                0,
            )?,
            question(
                "Why do models reproduce bias?",
                &[
                    "They are programmed to be provocative",
                    "Regulators require it",
                    "They inherit skews present in their training data",
                    "Bias improves accuracy",
                ],
                2,
            )?,
        ],
    )?;

    Ok(Course::new(
        CourseId::new("day2")?,
        "Day 2 — In Practice",
        "Image and multimodal generation, wiring models into real workflows, and the habits that keep AI use responsible.",
        vec![images, at_work, responsible],
    )?)
}

// ─── TESTS ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn catalog_builds() {
        let courses = workshop_courses().unwrap();
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].id().as_str(), "day1");
        assert_eq!(courses[1].id().as_str(), "day2");
    }

    #[test]
    fn every_section_has_a_quiz() {
        for course in workshop_courses().unwrap() {
            for section in course.sections() {
                assert!(
                    section.has_quiz(),
                    "section {} has no quiz and could never be completed",
                    section.id()
                );
            }
        }
    }

    #[test]
    fn section_ids_unique_across_catalog() {
        let courses = workshop_courses().unwrap();
        let mut seen = BTreeSet::new();
        for course in &courses {
            for section in course.sections() {
                assert!(
                    seen.insert(section.id().clone()),
                    "duplicate section id {} across courses",
                    section.id()
                );
            }
        }
    }

    #[test]
    fn bodies_are_not_placeholder() {
        for course in workshop_courses().unwrap() {
            for section in course.sections() {
                assert!(section.body().len() > 200, "thin body in {}", section.id());
            }
        }
    }
}
