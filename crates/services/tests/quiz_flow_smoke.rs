use course_core::time::fixed_clock;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{AppServices, QuizAdvance, QuizRun};

#[tokio::test]
async fn passing_a_quiz_unlocks_the_next_section() {
    let services = AppServices::in_memory(fixed_clock()).unwrap();
    let profile = services
        .auth()
        .sign_up("ada@example.com", "hunter22")
        .await
        .unwrap();

    let courses = services.courses();
    let course = &courses.courses()[0];
    let section = course.section(0).unwrap();
    assert!(course.is_section_locked(profile.completed(), 1));

    let mut rng = StdRng::seed_from_u64(7);
    let mut run = QuizRun::new(section.questions().to_vec(), &mut rng).unwrap();
    loop {
        let correct = run
            .options()
            .iter()
            .position(|option| option.correct)
            .unwrap();
        run.answer(correct).unwrap();
        match run.advance(&mut rng).unwrap() {
            QuizAdvance::NextQuestion => {}
            QuizAdvance::Passed => break,
            QuizAdvance::Restarted { .. } => panic!("perfect run must not restart"),
        }
    }
    assert!(run.is_passed());

    services
        .progress()
        .complete_section(profile.id(), section.id())
        .await
        .unwrap();
    // Re-reporting the same section (a re-passed quiz) is harmless.
    services
        .progress()
        .complete_section(profile.id(), section.id())
        .await
        .unwrap();

    let refreshed = services
        .progress()
        .profile(profile.id())
        .await
        .unwrap()
        .expect("profile");
    assert_eq!(refreshed.completed().len(), 1);
    assert!(!course.is_section_locked(refreshed.completed(), 1));
    assert!(course.is_section_locked(refreshed.completed(), 2));
}

#[tokio::test]
async fn an_imperfect_run_never_completes_a_section() {
    let services = AppServices::in_memory(fixed_clock()).unwrap();
    let courses = services.courses();
    let section = courses.courses()[0].section(0).unwrap();

    let mut rng = StdRng::seed_from_u64(7);
    let mut run = QuizRun::new(section.questions().to_vec(), &mut rng).unwrap();

    // Miss the first question, ace the rest: the run must restart, not pass.
    let wrong = run
        .options()
        .iter()
        .position(|option| !option.correct)
        .unwrap();
    run.answer(wrong).unwrap();
    loop {
        match run.advance(&mut rng).unwrap() {
            QuizAdvance::NextQuestion => {
                let correct = run
                    .options()
                    .iter()
                    .position(|option| option.correct)
                    .unwrap();
                run.answer(correct).unwrap();
            }
            QuizAdvance::Restarted { score } => {
                assert_eq!(score, section.questions().len() - 1);
                break;
            }
            QuizAdvance::Passed => panic!("a run with a miss must not pass"),
        }
    }
    assert!(!run.is_passed());
    assert_eq!(run.current_index(), 0);
    assert_eq!(run.score(), 0);
}
