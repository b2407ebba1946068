use serde::{Deserialize, Serialize};

/// A candidate POP location as returned by the geographic-site service.
///
/// Sites created by the quote load adapter carry only `id` and `name`; the
/// remaining fields are populated when the site comes from a live search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeographicSite {
    pub id: String,
    pub name: String,
    pub description: String,
    pub place: Vec<Place>,
}

/// Postal detail attached to a geographic site.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: String,
    pub street_name: String,
    pub postcode: String,
    pub city: String,
    pub country: String,
    /// Explicit structured address, preferred over any encoding hidden in
    /// `id`. Optional because older records only carry the positional form.
    pub address: Option<StructuredAddress>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StructuredAddress {
    pub street: String,
    pub city: String,
    pub country: String,
}

impl GeographicSite {
    /// Minimal stub used when reconstructing a site from a persisted quote,
    /// where only the place id and name survive.
    pub fn stub(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), ..Self::default() }
    }

    pub fn first_place(&self) -> Option<&Place> {
        self.place.first()
    }
}

/// POP identifier used in feasibility probes. Site ids are conventionally
/// `<country>-<city>-<pop>`; the probe wants the bare pop segment. Ids
/// without at least three dash segments are passed through unchanged.
pub fn pop_id_for_site(site_id: &str) -> &str {
    let mut segments = site_id.split('-');
    match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(_), Some(pop)) if !pop.is_empty() => pop,
        _ => site_id,
    }
}

#[cfg(test)]
mod tests {
    use super::pop_id_for_site;

    #[test]
    fn extracts_third_dash_segment() {
        assert_eq!(pop_id_for_site("FR-PAR-282187"), "282187");
    }

    #[test]
    fn keeps_trailing_segments_out_of_the_pop_id() {
        assert_eq!(pop_id_for_site("FR-PAR-282187-OLD"), "282187");
    }

    #[test]
    fn falls_back_to_raw_id_without_delimiters() {
        assert_eq!(pop_id_for_site("282187"), "282187");
        assert_eq!(pop_id_for_site("FR-PAR"), "FR-PAR");
        assert_eq!(pop_id_for_site("FR-PAR-"), "FR-PAR-");
    }
}
