use crate::models::SuggestionRequest;

/// Build the model prompt. Only the three request values vary.
pub fn build_prompt(req: &SuggestionRequest) -> String {
    format!(
        r#"I'm looking for creative and fun things to do. Please give me 4 unique suggestions based on these criteria:
- Location: {location}
- Time of Day: {time}
- Budget: {budget}

Focus on interesting, non-cliche ideas. For example, instead of "visit a museum," suggest "a late-night tour of a specific exhibit" or "a scavenger hunt in the National Portrait Gallery."

Return the response as a JSON array with the following structure:
[
    {{
        "name": "A short, catchy name for the activity",
        "description": "A creative and appealing one-paragraph description of the activity",
        "estimated_cost": "A brief description of the potential cost, like 'Free', '$10-$20 per person', etc.",
        "location_hint": "A hint about where this activity could take place, e.g., 'Georgetown waterfront' or 'Shenandoah National Park'"
    }}
]
"#,
        location = req.location,
        time = req.time,
        budget = req.budget,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_interpolates_request() {
        let prompt = build_prompt(&SuggestionRequest::new("Alexandria", "Evening", "$$"));

        assert!(prompt.contains("- Location: Alexandria"));
        assert!(prompt.contains("- Time of Day: Evening"));
        assert!(prompt.contains("- Budget: $$"));
        assert!(prompt.contains("4 unique suggestions"));
        assert!(prompt.contains("non-cliche"));
    }

    #[test]
    fn test_prompt_describes_suggestion_shape() {
        let prompt = build_prompt(&SuggestionRequest::new("a", "b", "c"));

        for field in ["\"name\"", "\"description\"", "\"estimated_cost\"", "\"location_hint\""] {
            assert!(prompt.contains(field), "prompt should mention {}", field);
        }
        // Escaped braces must render as literal JSON braces
        assert!(prompt.contains("    {\n"));
        assert!(!prompt.contains("{{"));
    }
}
