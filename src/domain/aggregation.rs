use crate::domain::categorizer::EventCategorizer;
use crate::domain::models::{
    Category, CategoryBreakdown, CategoryShare, SliceAllocation, TimeSlice,
};

/// Decides which categories a slice counts toward.
///
/// A covering break claims the whole slice, even if other events cover it too.
/// Otherwise the duration is split evenly per covering event (not per
/// category), so two events of the same category credit it twice their share.
pub fn allocate_slice(slice: &TimeSlice, categorizer: &EventCategorizer) -> SliceAllocation {
    let duration = f64::from(slice.duration_minutes());
    let categorized = slice
        .covering_events
        .iter()
        .map(|event| (event, categorizer.categorize(&event.title)))
        .collect::<Vec<_>>();

    let break_event_id = categorized
        .iter()
        .find(|(_, category)| *category == Category::Break)
        .map(|(event, _)| event.id.clone());

    let shares = if let Some(event_id) = break_event_id {
        vec![CategoryShare {
            category: Category::Break,
            event_id: Some(event_id),
            minutes: duration,
        }]
    } else if categorized.is_empty() {
        vec![CategoryShare {
            category: Category::Idle,
            event_id: None,
            minutes: duration,
        }]
    } else {
        let per_event = duration / categorized.len() as f64;
        categorized
            .into_iter()
            .map(|(event, category)| CategoryShare {
                category,
                event_id: Some(event.id.clone()),
                minutes: per_event,
            })
            .collect()
    };

    SliceAllocation {
        start_minute: slice.start_minute,
        end_minute: slice.end_minute,
        shares,
    }
}

/// Sums slice allocations into the final breakdown.
pub fn assemble_breakdown(allocations: &[SliceAllocation]) -> CategoryBreakdown {
    let mut breakdown = CategoryBreakdown::default();
    for share in allocations.iter().flat_map(|allocation| &allocation.shares) {
        breakdown.add(share.category, share.minutes);
    }

    breakdown.total_scheduled = Category::ALL
        .into_iter()
        .map(|category| breakdown.get(category))
        .sum();
    breakdown.total_work = breakdown.total_scheduled - breakdown.break_time;
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ClippedEvent;

    fn clipped(id: &str, title: &str, start_minute: u32, end_minute: u32) -> ClippedEvent {
        ClippedEvent {
            id: id.to_string(),
            start_minute,
            end_minute,
            title: title.to_string(),
        }
    }

    fn slice(start_minute: u32, end_minute: u32, covering_events: Vec<ClippedEvent>) -> TimeSlice {
        TimeSlice {
            start_minute,
            end_minute,
            covering_events,
        }
    }

    #[test]
    fn uncovered_slice_is_idle() {
        let allocation = allocate_slice(&slice(660, 780, vec![]), &EventCategorizer::default());
        assert_eq!(
            allocation.shares,
            vec![CategoryShare {
                category: Category::Idle,
                event_id: None,
                minutes: 120.0,
            }]
        );
    }

    #[test]
    fn break_overrides_concurrent_events() {
        let allocation = allocate_slice(
            &slice(
                600,
                630,
                vec![
                    clipped("mtg", "営業会議", 540, 660),
                    clipped("brk", "休憩", 600, 630),
                ],
            ),
            &EventCategorizer::default(),
        );
        assert_eq!(allocation.shares.len(), 1);
        assert_eq!(allocation.shares[0].category, Category::Break);
        assert_eq!(allocation.shares[0].event_id.as_deref(), Some("brk"));
        assert_eq!(allocation.shares[0].minutes, 30.0);
    }

    #[test]
    fn duration_is_split_per_covering_event() {
        let allocation = allocate_slice(
            &slice(
                540,
                600,
                vec![
                    clipped("a", "定例MTG", 540, 600),
                    clipped("b", "部内会議", 540, 600),
                    clipped("c", "資料レビュー", 540, 600),
                ],
            ),
            &EventCategorizer::default(),
        );
        let breakdown = assemble_breakdown(&[allocation]);
        assert_eq!(breakdown.meeting, 40.0);
        assert_eq!(breakdown.document, 20.0);
        assert_eq!(breakdown.total_scheduled, 60.0);
    }

    #[test]
    fn coincident_same_category_events_count_twice_their_share() {
        let allocation = allocate_slice(
            &slice(
                540,
                600,
                vec![clipped("a", "会議A", 540, 600), clipped("b", "会議B", 540, 600)],
            ),
            &EventCategorizer::default(),
        );
        assert_eq!(allocation.shares.len(), 2);
        assert!(allocation.shares.iter().all(|share| share.minutes == 30.0));
        assert_eq!(assemble_breakdown(&[allocation]).meeting, 60.0);
    }

    #[test]
    fn unmatched_titles_fall_back_to_other() {
        let allocation = allocate_slice(
            &slice(540, 570, vec![clipped("x", "歯医者", 540, 570)]),
            &EventCategorizer::default(),
        );
        let breakdown = assemble_breakdown(&[allocation]);
        assert_eq!(breakdown.other, 30.0);
        assert_eq!(breakdown.total_work, 30.0);
    }

    #[test]
    fn totals_exclude_break_from_work() {
        let categorizer = EventCategorizer::default();
        let allocations = vec![
            allocate_slice(&slice(540, 600, vec![clipped("a", "商談", 540, 600)]), &categorizer),
            allocate_slice(&slice(600, 660, vec![clipped("b", "昼食", 600, 660)]), &categorizer),
            allocate_slice(&slice(660, 700, vec![]), &categorizer),
        ];
        let breakdown = assemble_breakdown(&allocations);
        assert_eq!(breakdown.sales, 60.0);
        assert_eq!(breakdown.break_time, 60.0);
        assert_eq!(breakdown.idle, 40.0);
        assert_eq!(breakdown.total_scheduled, 160.0);
        assert_eq!(breakdown.total_work, 100.0);
    }

    #[test]
    fn no_allocations_give_zero_breakdown() {
        assert_eq!(assemble_breakdown(&[]), CategoryBreakdown::default());
    }
}
