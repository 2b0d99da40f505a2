use prospect_core::{FindingsRecord, PositioningDocument, QueryContext, Topic};

pub struct StagePrompts;

impl StagePrompts {
    /// Research prompt for one topic, with the raw search material the
    /// model should condense.
    pub fn research(topic: Topic, ctx: &QueryContext, material: &str) -> String {
        let company = &ctx.company_name;
        let instruction = match topic {
            Topic::News => format!(
                "You are a news analyst. Review the search results below about {company} \
                 and identify the most relevant news from the last 6-12 months \
                 (launches, funding, expansion, disputes, legal issues, layoffs, M&A, \
                 leadership changes). Output a bulleted list of the top 3 items."
            ),
            Topic::Competitors => format!(
                "You are a market analyst. From the search results below, identify \
                 {company}'s top 3 direct competitors and how {company} differentiates \
                 itself. Output a short summary of their competitive position."
            ),
            Topic::Metrics => format!(
                "You are a financial analyst. From the search results below, extract \
                 {company}'s key operating metrics: estimated revenue, headcount, number \
                 of customers, and YoY growth. Output a concise summary of their size \
                 and stage."
            ),
            Topic::TechStack => format!(
                "You are a technology investigator. From the search results below \
                 (job postings, engineering blogs), infer {company}'s tech stack. Focus \
                 ONLY on paid/vendor technologies (CRM, marketing/HR/financial \
                 platforms). Do NOT list open source or common frameworks. Output a \
                 list of identified technologies."
            ),
            Topic::Executive => format!(
                "You are an executive profiler. From the material below, research \
                 {prospect} of {company}: title, work history, skills, plus any \
                 interviews, articles, or talks. Output a professional bio summary.",
                prospect = ctx.prospect_name,
            ),
        };

        format!(
            "{instruction}\n\n## Search Results\n{material}\n\nReturn only the requested output."
        )
    }

    /// Positioning prompt fed by the frozen findings record. Unavailable
    /// topics are called out so the model does not invent them.
    pub fn positioning(
        ctx: &QueryContext,
        findings: &FindingsRecord,
        knowledge_base: Option<&str>,
    ) -> String {
        let mut prompt = format!(
            "You are a solutions architect and strategist. Your goal is to map the \
             needs of {company} (prospect: {prospect}) to our AI portfolio.\n\n\
             ## Company Research\n",
            company = ctx.company_name,
            prospect = ctx.prospect_name,
        );

        for finding in findings.findings() {
            prompt.push_str(&format!(
                "### {}\n{}\n\n",
                finding.topic.label(),
                finding.summary
            ));
        }

        let gaps = findings.gaps();
        if !gaps.is_empty() {
            let gap_list = gaps
                .iter()
                .map(|t| t.label())
                .collect::<Vec<_>>()
                .join(", ");
            prompt.push_str(&format!(
                "### Research Gaps\nNo research is available for: {gap_list}. \
                 Work only with the sections above; do not fabricate the missing areas.\n\n"
            ));
        }

        if let Some(library) = knowledge_base {
            prompt.push_str(&format!(
                "## Case Study Library\n{library}\n\n\
                 From the library above, select the 3 case studies most relevant to \
                 this prospect's industry or pain points and use them as proof points.\n\n"
            ));
        }

        prompt.push_str(
            "## Your Tasks\n\
             1. Identify 2-3 key pain points or opportunities based on their size, \
             stack, and recent news.\n\
             2. Formulate how our AI portfolio solves their specific problems.\n\n\
             ## Output Format\n\
             ## Strategic Analysis\n[Analysis of pain points]\n\
             ## Recommended Solution Angle\n[Mapping to specific products]\n\
             ## Relevant Proof Points\n1. [Company]: [Why it's relevant]\n2. ...\n3. ...",
        );

        prompt
    }

    /// Outreach prompt. The response must carry the `EMAIL DRAFT` and
    /// `CALL SCRIPT` headings the section parser looks for.
    pub fn outreach(
        ctx: &QueryContext,
        findings: &FindingsRecord,
        positioning: &PositioningDocument,
    ) -> String {
        let lead_profile = findings
            .finding(Topic::Executive)
            .map(|f| f.summary.as_str())
            .unwrap_or("No profile research available.");

        format!(
            "You are a senior sales copywriter. Write the actual messages to the \
             prospect using the positioning strategy below.\n\n\
             ## Prospect\n{prospect} at {company}\n\n\
             ## Lead Profile\n{lead_profile}\n\n\
             ## Positioning Strategy\n{strategy}\n\n\
             ## Sales Rep\n{rep_name} ({rep_title})\n\n\
             ## Your Task\n\
             1. A high-impact cold email: punchy subject line, an opening that \
             references specific research, a value prop citing ONE relevant proof \
             point, a low-friction call to action, signed off with the sales rep's \
             name.\n\
             2. A 30-second talk track for a voicemail or cold call opening.\n\n\
             Style: concise, professional, not salesy.\n\n\
             Format the response with exactly these two headings:\n\
             EMAIL DRAFT\n[the email]\n\
             CALL SCRIPT\n[the talk track]\n\n\
             Return ONLY the email and call script text, nothing else.",
            prospect = ctx.prospect_name,
            company = ctx.company_name,
            strategy = positioning.analysis,
            rep_name = ctx.sales_rep.name,
            rep_title = ctx.sales_rep.title,
        )
    }
}
