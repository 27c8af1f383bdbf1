use std::sync::Arc;

use log::LevelFilter;
use rustspeaker::{
    concatenate_utterances, evaluate, AlignmentStrategy, MatchTimer, MatcherConfig, Sequence,
    SpeakerIdError, TemplateDirectory, TemplateMatcher, TemplateSet, FRAME_COEFFICIENTS,
    UNKNOWN_LABEL,
};
use simple_logger::SimpleLogger;

#[test]
fn it_identifies_the_closest_speaker() {
    init_logger();
    let templates = build_template_set();
    for strategy in [
        AlignmentStrategy::Full,
        AlignmentStrategy::window(),
        AlignmentStrategy::beam(),
    ] {
        let matcher = build_matcher(strategy);
        let input = speaker_utterance(2., 21, 0.1);
        let result = matcher.best_match(&input, Some(&templates)).unwrap();
        assert_eq!(result.label, "bob", "strategy {}", strategy);
        assert!(!result.is_unknown());
    }
}

#[test]
fn it_keeps_the_first_template_on_ties() {
    let mut templates = TemplateSet::new();
    let template = speaker_utterance(1., 12, 0.);
    templates.add("first", template.clone());
    templates.add("second", template.clone());
    templates.add("third", speaker_utterance(5., 12, 0.));
    let result = build_matcher(AlignmentStrategy::Full)
        .best_match(&speaker_utterance(3., 12, 0.), Some(&templates))
        .unwrap();
    assert_eq!(result.label, "first");
}

#[test]
fn it_returns_unknown_for_an_empty_template_set() {
    let templates = TemplateSet::new();
    let result = build_matcher(AlignmentStrategy::Full)
        .best_match(&speaker_utterance(1., 10, 0.), Some(&templates))
        .unwrap();
    assert_eq!(result.label, UNKNOWN_LABEL);
    assert_eq!(result.distance, f32::INFINITY);
    assert!(result.is_unknown());
}

#[test]
fn it_fails_without_a_template_set() {
    let result = build_matcher(AlignmentStrategy::Full)
        .best_match::<FRAME_COEFFICIENTS>(&speaker_utterance(1., 10, 0.), None);
    assert!(matches!(result, Err(SpeakerIdError::InvalidInput(_))));
}

#[test]
fn it_returns_unknown_when_every_path_is_pruned() {
    let mut templates = TemplateSet::new();
    templates.add("long", speaker_utterance(1., 40, 0.));
    let matcher = build_matcher(AlignmentStrategy::Beam {
        window_size: 0,
        beam_threshold: 0.,
    });
    let result = matcher
        .best_match(&speaker_utterance(1., 2, 0.), Some(&templates))
        .unwrap();
    assert_eq!(result.label, UNKNOWN_LABEL);
    assert!(result.is_unknown());
}

#[test]
fn it_uses_the_configured_unknown_label() {
    let config = MatcherConfig {
        unknown_label: "nobody".to_string(),
        ..MatcherConfig::default()
    };
    let matcher = TemplateMatcher::new(&config).unwrap();
    let result = matcher.best_match_in(&speaker_utterance(1., 10, 0.), &TemplateSet::new());
    assert_eq!(result.label, "nobody");
}

#[test]
fn it_matches_the_same_from_disk_and_from_memory() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let directory = TemplateDirectory::new(dir.path().join("template"));
    let templates = build_template_set();
    for template in &templates {
        directory.save(&template.label, &template.sequence).unwrap();
    }
    let loaded = directory.load_all::<FRAME_COEFFICIENTS>().unwrap();
    assert_eq!(loaded.len(), templates.len());
    for strategy in [
        AlignmentStrategy::Full,
        AlignmentStrategy::window(),
        AlignmentStrategy::beam(),
    ] {
        let matcher = build_matcher(strategy);
        let input = speaker_utterance(3.1, 17, 0.2);
        let streamed = matcher.best_match_in_directory(&input, &directory).unwrap();
        let in_memory = matcher.best_match(&input, Some(&loaded)).unwrap();
        assert_eq!(streamed, in_memory);
        assert_eq!(streamed.label, "carol");
    }
}

#[test]
fn it_skips_broken_template_files() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let directory = TemplateDirectory::new(dir.path());
    directory.save("alice", &speaker_utterance(1., 10, 0.)).unwrap();
    std::fs::write(dir.path().join("broken.txt"), "1.0|2.0\n1.0\n").unwrap();
    let result = build_matcher(AlignmentStrategy::Full)
        .best_match_in_directory(&speaker_utterance(1., 10, 0.), &directory)
        .unwrap();
    assert_eq!(result.label, "alice");
    assert_eq!(result.distance, 0.);
}

#[test]
fn it_matches_templates_holding_undecodable_values() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let directory = TemplateDirectory::new(dir.path());
    let alice = Sequence::from_coefficients(vec![[5., 5.], [5., 5.]]).unwrap();
    directory.save("alice", &alice).unwrap();
    std::fs::write(dir.path().join("bob.txt"), b"1.0|\xff\n1.0|2.0\n").unwrap();
    let input = Sequence::from_coefficients(vec![[1., 1.], [0., 2.]]).unwrap();
    let result = build_matcher(AlignmentStrategy::Full)
        .best_match_in_directory(&input, &directory)
        .unwrap();
    assert_eq!(result.label, "bob");
    assert_eq!(result.distance, 0.);
    let loaded = directory.load_all::<2>().unwrap();
    assert_eq!(loaded.labels(), vec!["alice", "bob"]);
}

#[test]
fn it_ignores_files_that_do_not_name_a_label() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let directory = TemplateDirectory::new(dir.path());
    directory.save("alice", &speaker_utterance(1., 10, 0.)).unwrap();
    std::fs::write(dir.path().join("..txt"), "1.0|2.0\n1.0|2.0\n").unwrap();
    std::fs::write(dir.path().join("a\\b.txt"), "1.0|2.0\n1.0|2.0\n").unwrap();
    assert_eq!(directory.labels().unwrap(), vec!["alice"]);
    let result = build_matcher(AlignmentStrategy::Full)
        .best_match_in_directory(&speaker_utterance(1., 10, 0.), &directory)
        .unwrap();
    assert_eq!(result.label, "alice");
    assert_eq!(directory.load_all::<FRAME_COEFFICIENTS>().unwrap().len(), 1);
}

#[test]
fn it_returns_unknown_for_a_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let directory = TemplateDirectory::new(dir.path().join("missing"));
    let result = build_matcher(AlignmentStrategy::Full)
        .best_match_in_directory(&speaker_utterance(1., 10, 0.), &directory)
        .unwrap();
    assert!(result.is_unknown());
    assert_eq!(result.label, UNKNOWN_LABEL);
}

#[test]
fn it_finds_the_best_match_index() {
    let matcher = build_matcher(AlignmentStrategy::Full);
    let templates = vec![
        speaker_utterance(5., 10, 0.),
        speaker_utterance(1., 10, 0.),
        speaker_utterance(3., 10, 0.),
    ];
    let index = matcher
        .best_match_index(&speaker_utterance(1.2, 10, 0.), &templates)
        .unwrap();
    assert_eq!(index, Some(1));
    let result = matcher.best_match_index(&speaker_utterance(1., 10, 0.), &[]);
    assert!(matches!(result, Err(SpeakerIdError::InvalidInput(_))));
}

#[test]
fn it_times_matching_and_loading() {
    let dir = tempfile::tempdir().unwrap();
    let directory = TemplateDirectory::new(dir.path());
    let templates = build_template_set();
    for template in &templates {
        directory.save(&template.label, &template.sequence).unwrap();
    }
    let timer = Arc::new(MatchTimer::new());
    let matcher = TemplateMatcher::with_observer(&MatcherConfig::default(), timer.clone()).unwrap();
    let input = speaker_utterance(1., 15, 0.);
    matcher.best_match(&input, Some(&templates)).unwrap();
    matcher.best_match_in_directory(&input, &directory).unwrap();
    let summary = timer.summary();
    assert_eq!(summary.matching_calls, 2 * templates.len());
    assert_eq!(summary.loading_calls, templates.len());
    assert_eq!(summary.searches, 2);
    assert!(summary.total_time >= summary.matching_time);
    println!("{}", summary);
    timer.reset();
    assert_eq!(timer.summary().matching_calls, 0);
}

#[test]
fn it_evaluates_a_labeled_test_set() {
    let matcher = build_matcher(AlignmentStrategy::Full);
    let templates = build_template_set();
    let mut test_set = TemplateSet::new();
    test_set.add("alice", speaker_utterance(1.1, 18, 0.3));
    test_set.add("bob", speaker_utterance(2.05, 22, 0.1));
    test_set.add("carol", speaker_utterance(1., 16, 0.));
    let report = evaluate(&matcher, &templates, &test_set);
    assert_eq!(report.total, 3);
    assert_eq!(report.misclassified, 1);
    assert_eq!(report.results[2].label, "alice");
    assert!((report.error_rate() - 1. / 3.).abs() < 1e-6);
    assert!((report.accuracy() - 2. / 3.).abs() < 1e-6);
}

#[test]
fn it_concatenates_utterances_per_speaker() {
    let mut utterances = TemplateSet::new();
    for index in 0..5 {
        utterances.add("alice", speaker_utterance(1. + index as f32, 4, 0.));
    }
    utterances.add("bob", speaker_utterance(2., 3, 0.));
    let grouped = concatenate_utterances(&utterances, 2).unwrap();
    assert_eq!(grouped.len(), 2);
    assert!(grouped.iter().all(|template| template.label == "alice"));
    assert!(grouped.iter().all(|template| template.sequence.len() == 8));
    let expected = speaker_utterance(3., 4, 0.).concat(&speaker_utterance(4., 4, 0.));
    assert_eq!(grouped.iter().nth(1).unwrap().sequence, expected);
    let whole = concatenate_utterances(&utterances, 5).unwrap();
    assert_eq!(whole.len(), 1);
    assert_eq!(whole.iter().next().unwrap().sequence.len(), 20);
    assert!(matches!(
        concatenate_utterances(&utterances, 0),
        Err(SpeakerIdError::InvalidInput(_))
    ));
}

fn init_logger() {
    let _ = SimpleLogger::new().with_level(LevelFilter::Debug).init();
}

fn build_matcher(strategy: AlignmentStrategy) -> TemplateMatcher {
    let config = MatcherConfig {
        strategy,
        ..MatcherConfig::default()
    };
    TemplateMatcher::new(&config).unwrap()
}

fn build_template_set() -> TemplateSet {
    let mut templates = TemplateSet::new();
    templates.add("alice", speaker_utterance(1., 18, 0.));
    templates.add("bob", speaker_utterance(2., 20, 0.));
    templates.add("carol", speaker_utterance(3., 16, 0.));
    templates
}

/// Utterance whose coefficients oscillate around a speaker specific level.
fn speaker_utterance(level: f32, frames: usize, wobble: f32) -> Sequence {
    let coefficients = (0..frames)
        .map(|frame_index| {
            let mut frame = [level; FRAME_COEFFICIENTS];
            for (coefficient_index, coefficient) in frame.iter_mut().enumerate() {
                *coefficient += wobble * ((frame_index + coefficient_index) % 3) as f32;
            }
            frame
        })
        .collect();
    Sequence::from_coefficients(coefficients).unwrap()
}
