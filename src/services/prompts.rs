//! Prompt templates for each stage. Placeholders use `{name}`; literal JSON
//! braces in the examples are left alone by the renderer.

pub const PREFERENCE_PROMPT: &str = r#"You are the preference analyst of a travel planning team. Turn the traveler's request into a normalized trip profile.

Free-form request:
{userInput}

Form fields (may be partial):
{structuredFields}

Respond with ONLY one JSON object, no prose and no code fences, shaped exactly like this:
{
  "origin": "departure city or empty string",
  "destinations": ["first destination", "second destination"],
  "startDate": "YYYY-MM-DD",
  "endDate": "YYYY-MM-DD",
  "budgetMin": 0,
  "budgetMax": 0,
  "currency": "USD",
  "pace": "chill | balanced | packed",
  "interests": ["interest"],
  "constraints": {
    "dietary": ["restriction"],
    "walkingTolerance": "low | medium | high",
    "mustSeeItems": ["place or experience"],
    "additionalNotes": "anything else worth knowing"
  }
}

Fill gaps with sensible defaults. Without explicit dates, start two weeks from today and stay five days. Budgets are totals for the whole trip and budgetMin must not exceed budgetMax."#;

pub const RESEARCH_PROMPT: &str = r#"You are the research agent of a travel planning team. Propose candidate activities for the trip below.

Trip profile:
{tripProfile}

Trip length: {numDays} days

Suggest five to seven activities per day that:
- match these interests: {interests}
- fit a total budget of {budgetMin}-{budgetMax} {currency}
- suit a {pace} pace
- respect dietary needs: {dietary}
- cover the must-see items: {mustSeeItems}

Respond with ONLY a JSON array, no prose and no code fences, where every element looks like:
{
  "id": "short-unique-id",
  "name": "Activity name",
  "description": "One or two sentences",
  "category": "sight | food | activity | nightlife | nature | culture | shopping | rest",
  "neighborhood": "District or area",
  "duration": 90,
  "costEstimate": 25,
  "tags": ["tag"],
  "timeOfDay": "morning | afternoon | evening"
}

"duration" is in minutes and "costEstimate" is in {currency}. Mix categories, neighborhoods and price levels, and include lesser-known local spots next to the classics."#;

pub const ITINERARY_PROMPT: &str = r#"You are the itinerary agent of a travel planning team. Arrange the candidate activities into a day-by-day plan.

Trip profile:
{tripProfile}

Candidate activities:
{activities}

Rules:
1. Each day has a morning block (2-3 activities), an afternoon block (2-3) and an evening block (1-2).
2. Honor the "{pace}" pace: chill leaves room to rest, packed fits in as much as is reasonable.
3. Keep the whole trip within {budgetMin}-{budgetMax} {currency} across {numDays} days.
4. Avoid three activities of the same category in a row.
5. Cluster activities by neighborhood to limit travel.
6. Leave breaks between activities and put food at meal times.

Respond with ONLY one JSON object, no prose and no code fences:
{
  "days": [
    {
      "dayIndex": 0,
      "date": "YYYY-MM-DD",
      "morningActivities": [],
      "afternoonActivities": [],
      "eveningActivities": [],
      "dailyBudget": 0
    }
  ],
  "totalEstimatedCost": 0,
  "summary": "Two or three sentences on the themes and highlights of the trip"
}

Activity entries keep the exact fields of the candidate activities."#;

pub const REFINE_PROMPT: &str = r#"You are the refinement agent of a travel planning team. Adjust an existing itinerary to address the traveler's feedback.

Current itinerary:
{itinerary}

Traveler feedback:
{feedback}

Rules:
1. Change only what the feedback calls for; do not rebuild the plan from scratch.
2. Keep activities the feedback does not mention.
3. For pace changes, add or remove activities.
4. For budget changes, swap in cheaper or more premium alternatives.
5. For theme changes (e.g. "more food", "fewer museums"), swap the matching activities.
6. Keep the same dates and day order.

Respond with ONLY one JSON object, no prose and no code fences, containing every day (including unchanged ones):
{
  "days": [],
  "totalEstimatedCost": 0,
  "summary": "Updated overview of the trip"
}"#;

pub const REGENERATE_DAY_PROMPT: &str = r#"You are the day-planning agent of a travel planning team. Produce a fresh plan for one day of an existing trip.

Trip profile:
{tripProfile}

Day being replaced (dayIndex {dayIndex}):
{currentDay}

The other days of the trip (do not repeat their activities):
{otherDays}

Extra constraints from the traveler:
{constraints}

The new day must:
1. Fit the traveler's interests and budget.
2. Share no activities with the other days.
3. Have a morning block (2-3 activities), an afternoon block (2-3) and an evening block (1-2).
4. Address the extra constraints.

Respond with ONLY one JSON object, no prose and no code fences:
{
  "dayIndex": {dayIndex},
  "date": "{date}",
  "morningActivities": [],
  "afternoonActivities": [],
  "eveningActivities": [],
  "dailyBudget": 0
}"#;
