//! Rotating study-plan generation
//!
//! Distributes pending tasks over a run of days by simple rotation, so a
//! short task list still fills a long plan.

use super::models::Todo;

/// Plans run between one day and a month.
const MAX_PLAN_DAYS: usize = 30;

/// One line per day, cycling through the pending tasks in order.
/// An empty task list yields an empty plan.
pub fn generate_plan(pending: &[&Todo], days: usize) -> Vec<String> {
    if pending.is_empty() {
        return Vec::new();
    }
    let days = days.clamp(1, MAX_PLAN_DAYS);
    (0..days)
        .map(|i| format!("Day {}: {}", i + 1, pending[i % pending.len()].text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::models::Priority;
    use uuid::Uuid;

    fn todo(text: &str) -> Todo {
        Todo::new(Uuid::new_v4(), text.to_string(), Priority::Med, None)
    }

    #[test]
    fn test_plan_rotates_pending_tasks() {
        let todos = [todo("read"), todo("revise"), todo("practice")];
        let pending: Vec<&Todo> = todos.iter().collect();
        let plan = generate_plan(&pending, 7);
        assert_eq!(
            plan,
            vec![
                "Day 1: read",
                "Day 2: revise",
                "Day 3: practice",
                "Day 4: read",
                "Day 5: revise",
                "Day 6: practice",
                "Day 7: read",
            ]
        );
    }

    #[test]
    fn test_plan_days_clamped() {
        let todos = [todo("read")];
        let pending: Vec<&Todo> = todos.iter().collect();
        assert_eq!(generate_plan(&pending, 0).len(), 1);
        assert_eq!(generate_plan(&pending, 90).len(), 30);
    }

    #[test]
    fn test_empty_task_list_gives_empty_plan() {
        assert!(generate_plan(&[], 7).is_empty());
    }
}
