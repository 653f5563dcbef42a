//! Prompt Builder — composes the system instruction and user prompt for both
//! request modes. The system instruction carries the filtered policy context
//! and the strictness rules; the user prompt carries the structured applicant
//! fields as labeled lines.

use crate::eligibility::models::{CaseRequest, DiscoveryRequest};

/// Substituted when the officer leaves the clarifying question blank.
pub const DEFAULT_QUESTION: &str = "Is the applicant eligible based on the provided details?";

/// System instruction for a single-scheme analysis.
pub fn analysis_system_instruction(location: &str, policy_context: &str) -> String {
    format!(
        r#"You are PolicyPulse, a strict policy eligibility engine for Indian Government Services.
You have access to the following Internal Policy Database (treat input currency as INR ₹).

The database has been pre-filtered based on the applicant's location ("{location}").

{policy_context}

Task: Analyze the input case against these rules.
- If the applicant asks a specific question (e.g., "Can a doctor apply for PM-KISAN?"), answer that specifically based on the exclusion criteria.
- If the scheme name doesn't match perfectly, infer the closest one from the provided list.
- Be extremely strict about Income Limits and Categories.
- Break down the analysis into specific criteria (e.g., Age, Income, Category, Domicile/Location) and state if each is met.
- IMPORTANT: Check Domicile/Location criteria strictly. If a scheme is for a specific state (e.g. Madhya Pradesh) and the applicant location does not match, they are Not Eligible.

ADDITIONALLY:
- Review the *other* policies in the provided database context.
- Identify 1 to 3 OTHER schemes (excluding the one currently being analyzed) that this applicant is likely eligible for based on their Age, Income, Category, and Location.
- If no other schemes are relevant, return an empty list for related schemes.

Return the result in JSON format only."#
    )
}

/// User prompt for a single-scheme analysis: the case fields as labeled lines.
pub fn analysis_user_prompt(request: &CaseRequest) -> String {
    let question = request
        .question
        .as_deref()
        .filter(|q| !q.trim().is_empty())
        .unwrap_or(DEFAULT_QUESTION);

    format!(
        "Analyze this case:\n\
         Scheme: {}\n\
         Applicant Age: {}\n\
         Annual Income: {}\n\
         Category: {}\n\
         Location: {}\n\
         Application Type: {}\n\
         Specific Question: {}",
        request.scheme,
        request.age,
        request.income,
        request.category,
        request.location,
        request.application_type,
        question
    )
}

/// System instruction for a multi-scheme discovery search.
pub fn discovery_system_instruction(request: &DiscoveryRequest, policy_context: &str) -> String {
    format!(
        r#"You are a government welfare expert.
You will be given a user profile and a database of government schemes.
Your task is to identify ALL schemes for which the user is ELIGIBLE.

Strictly follow these rules:
1. Check Age limits.
2. Check Income limits (User income is {income}).
3. Check Category (User is {category}).
4. Check Location (User is in {location}). If a scheme is for a specific state that doesn't match the user, DO NOT include it.
5. If the user specified a department, prioritize schemes from that department but include others if highly relevant.

Database:
{policy_context}"#,
        income = request.income,
        category = request.category,
        location = request.location,
    )
}

/// User prompt for discovery: the applicant profile as labeled lines.
pub fn discovery_user_prompt(request: &DiscoveryRequest) -> String {
    format!(
        "User Profile:\n\
         Name: {}\n\
         Age: {}\n\
         Annual Family Income: {}\n\
         Location: {}\n\
         Category: {}\n\
         Preferred Department: {}\n\
         \n\
         Find all eligible schemes.",
        request.name,
        request.age,
        request.income,
        request.location,
        request.category,
        request.department.as_deref().unwrap_or("Any"),
    )
}
