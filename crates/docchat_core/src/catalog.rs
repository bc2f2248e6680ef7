//! Quick-analysis catalog: short keys mapped to canned queries.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisEntry {
    pub key: String,
    pub label: String,
    pub query: String,
}

impl AnalysisEntry {
    pub fn new(key: impl Into<String>, label: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            query: query.into(),
        }
    }
}

/// Immutable lookup table built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisCatalog {
    entries: Vec<AnalysisEntry>,
}

impl AnalysisCatalog {
    /// Builds a catalog from configured entries. A later entry with a key that
    /// was already seen is ignored so lookups stay unambiguous.
    pub fn new(entries: impl IntoIterator<Item = AnalysisEntry>) -> Self {
        let mut unique: Vec<AnalysisEntry> = Vec::new();
        for entry in entries {
            if unique.iter().any(|existing| existing.key == entry.key) {
                docchat_logging::docchat_warn!("Duplicate analysis key {:?} ignored", entry.key);
                continue;
            }
            unique.push(entry);
        }
        Self { entries: unique }
    }

    pub fn lookup(&self, key: &str) -> Option<&AnalysisEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn entries(&self) -> &[AnalysisEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AnalysisCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_ENTRIES.iter().map(|(key, label, query)| {
            AnalysisEntry::new(*key, *label, *query)
        }))
    }
}

const DEFAULT_ENTRIES: &[(&str, &str, &str)] = &[
    (
        "contract-summary",
        "Contract Summary",
        "Provide a comprehensive summary of the uploaded contract(s): the parties, the purpose \
         of the agreement, the key obligations of each party, the term, and any unusual provisions.",
    ),
    (
        "risk-assessment",
        "Risk Assessment",
        "Identify the main legal and commercial risks in these documents. For each risk, state \
         which clause creates it, how severe it is, and what could mitigate it.",
    ),
    (
        "dispute-clauses",
        "Dispute Clauses",
        "Find every dispute resolution provision: arbitration, mediation, escalation steps, \
         governing rules, seat and venue. Quote the relevant clauses and explain how they interact.",
    ),
    (
        "critical-dates",
        "Critical Dates",
        "List all critical dates, deadlines, notice periods and renewal windows in the documents, \
         in chronological order, with the clause each one comes from.",
    ),
    (
        "ip-confidentiality",
        "IP & Confidentiality",
        "Summarize the intellectual property and confidentiality terms: ownership, licences, \
         permitted disclosures, duration of obligations and any NDA carve-outs.",
    ),
    (
        "financial-terms",
        "Financial Terms",
        "Extract all financial terms: fees, payment schedules, price adjustments, penalties, \
         caps on liability and indemnities. Present them as a table where possible.",
    ),
    (
        "termination-rights",
        "Termination Rights",
        "Explain the termination rights of each party: termination for cause, for convenience, \
         required notice, cure periods and the consequences of termination.",
    ),
    (
        "jurisdiction-law",
        "Jurisdiction & Law",
        "What governing law and jurisdiction apply to these documents? Note any conflicts \
         between documents and any exclusive or non-exclusive jurisdiction clauses.",
    ),
];
