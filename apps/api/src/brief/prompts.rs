// All LLM prompt constants for brief assembly.

use crate::models::BriefRequest;

/// System prompt for the summary call.
pub const SUMMARY_SYSTEM: &str = "You're a blunt business coach. Clear, simple, no fluff.";

/// Fixed strength line embedded in every summary prompt until review scraping
/// feeds real data in.
pub const REVIEW_STRENGTH_PLACEHOLDER: &str =
    "Google reviews show an average rating of 4.7 stars.";

/// System prompt for the keyword call.
pub const KEYWORD_SYSTEM: &str =
    "You help generate Google Maps search terms for business partnerships.";

/// Builds the summary prompt for a submission. Plain, non-technical tone with
/// three fixed subsections.
pub fn summary_prompt(request: &BriefRequest) -> String {
    format!(
        "Write a short, clear business summary at a 6th-grade level.\n\
         \n\
         Business: {business}\n\
         Type: {category}\n\
         Location: {location}\n\
         Goal: {goal}\n\
         \n\
         ## What's Working\n\
         {strength}\n\
         \n\
         ## What To Do Next\n\
         Give 1 short recommendation that could help make more money.\n\
         \n\
         ## People to Connect With\n\
         List 2-3 helpful business types or categories to partner with.",
        business = request.business_name,
        category = request.category,
        location = request.location,
        goal = request.goal,
        strength = REVIEW_STRENGTH_PLACEHOLDER,
    )
}

/// Builds the keyword-derivation prompt for a submission.
pub fn keyword_prompt(request: &BriefRequest) -> String {
    format!(
        "Suggest 2-3 simple search keywords to find helpful local businesses for:\n\
         \n\
         Business Type: {category}\n\
         Location: {location}\n\
         Goal: {goal}",
        category = request.category,
        location = request.location,
        goal = request.goal,
    )
}
