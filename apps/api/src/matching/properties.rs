//! Property-based tests for the scoring, ranking and gap invariants.

use proptest::prelude::*;

use crate::errors::AppError;
use crate::matching::gap::analyze_gap;
use crate::matching::policy::{GapPolicy, ScoringPolicy};
use crate::matching::ranking::{rank_candidates, RankFilters};
use crate::matching::scoring::score;
use crate::models::skill::{
    CandidateSkill, JobRequirementSet, ProficiencyLevel, SkillProfile, SkillRequirement,
};

const SKILLS: [&str; 8] = ["rust", "go", "sql", "k8s", "aws", "react", "python", "kafka"];

fn arb_level() -> impl Strategy<Value = ProficiencyLevel> {
    prop_oneof![
        Just(ProficiencyLevel::Beginner),
        Just(ProficiencyLevel::Intermediate),
        Just(ProficiencyLevel::Advanced),
        Just(ProficiencyLevel::Expert),
    ]
}

fn arb_requirements() -> impl Strategy<Value = JobRequirementSet> {
    prop::sample::subsequence(SKILLS.to_vec(), 0..=SKILLS.len())
        .prop_flat_map(|ids| {
            let n = ids.len();
            (
                Just(ids),
                prop::collection::vec((0.01f64..=1.0, any::<bool>()), n),
            )
        })
        .prop_map(|(ids, params)| {
            JobRequirementSet::new(
                ids.into_iter()
                    .zip(params)
                    .map(|(id, (importance, required))| SkillRequirement {
                        skill_id: id.to_string(),
                        importance,
                        required,
                    })
                    .collect(),
            )
        })
}

fn arb_profile() -> impl Strategy<Value = SkillProfile> {
    prop::sample::subsequence(SKILLS.to_vec(), 0..=SKILLS.len())
        .prop_flat_map(|ids| {
            let n = ids.len();
            (
                Just(ids),
                prop::collection::vec((arb_level(), 0.0f64..40.0), n),
            )
        })
        .prop_map(|(ids, params)| {
            SkillProfile::new(
                ids.into_iter()
                    .zip(params)
                    .map(|(id, (proficiency_level, years_experience))| CandidateSkill {
                        skill_id: id.to_string(),
                        proficiency_level,
                        years_experience,
                    })
                    .collect(),
            )
        })
}

proptest! {
    #[test]
    fn score_is_non_negative_and_zero_iff_nothing_matched(
        profile in arb_profile(),
        requirements in arb_requirements(),
    ) {
        let s = score(&profile, &requirements, &ScoringPolicy::default()).unwrap();
        prop_assert!(s.score >= 0.0);
        prop_assert!(s.score.is_finite());
        let nothing_matched = s.matched_skill_count == 0;
        let no_requirements = requirements.requirements.is_empty();
        prop_assert_eq!(s.score == 0.0, nothing_matched || no_requirements);
        prop_assert_eq!(s.degenerate, requirements.requirements.is_empty());
    }

    #[test]
    fn more_experience_never_lowers_score(
        profile in arb_profile(),
        requirements in arb_requirements(),
        index in any::<prop::sample::Index>(),
        extra_years in 0.0f64..20.0,
    ) {
        prop_assume!(!profile.skills.is_empty());
        let before = score(&profile, &requirements, &ScoringPolicy::default()).unwrap();

        let mut grown = profile.clone();
        let i = index.index(grown.skills.len());
        grown.skills[i].years_experience += extra_years;
        let after = score(&grown, &requirements, &ScoringPolicy::default()).unwrap();

        prop_assert!(after.score >= before.score);
    }

    #[test]
    fn ranking_is_deterministic(
        requirements in arb_requirements(),
        profiles in prop::collection::vec(arb_profile(), 0..25),
        min_score in prop::option::of(0.0f64..1.2),
        require_all_mandatory in any::<bool>(),
        limit in prop::option::of(1usize..10),
        offset in 0usize..5,
    ) {
        let candidates: Vec<(i64, SkillProfile)> = profiles
            .into_iter()
            .enumerate()
            .map(|(i, p)| (i as i64, p))
            .collect();
        let filters = RankFilters { min_score, require_all_mandatory, limit, offset };
        let policy = ScoringPolicy::default();

        let first = rank_candidates(1, &requirements, &candidates, &filters, &policy).unwrap();
        let second = rank_candidates(1, &requirements, &candidates, &filters, &policy).unwrap();
        prop_assert_eq!(&first, &second);

        for pair in first.results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        if let Some(min) = min_score {
            prop_assert!(first.results.iter().all(|r| r.score >= min));
        }
    }

    #[test]
    fn seasoned_expert_has_no_gaps(requirements in arb_requirements(), years in 5.0f64..40.0) {
        let profile = SkillProfile::new(
            requirements
                .requirements
                .iter()
                .map(|r| CandidateSkill {
                    skill_id: r.skill_id.clone(),
                    proficiency_level: ProficiencyLevel::Expert,
                    years_experience: years,
                })
                .collect(),
        );
        let report = analyze_gap(
            1,
            &profile,
            2,
            &requirements,
            &GapPolicy::default(),
            &ScoringPolicy::default(),
        )
        .unwrap();
        prop_assert!(report.missing.is_empty());
        prop_assert!(report.underleveled.is_empty());
    }

    #[test]
    fn duplicate_requirement_always_rejected(
        profile in arb_profile(),
        requirements in arb_requirements(),
        index in any::<prop::sample::Index>(),
    ) {
        prop_assume!(!requirements.requirements.is_empty());
        let mut doubled = requirements.clone();
        let dup = doubled.requirements[index.index(doubled.requirements.len())].clone();
        doubled.requirements.push(dup);

        let err = score(&profile, &doubled, &ScoringPolicy::default()).unwrap_err();
        let is_validation = matches!(err, AppError::Validation { .. });
        prop_assert!(is_validation);
    }
}
