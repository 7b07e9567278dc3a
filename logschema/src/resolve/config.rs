// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Resolver configuration
//!
//! Captured once by [`PathResolver`](super::PathResolver) at construction and never mutated
//! afterwards, so concurrent resolutions always observe the same policy.

use serde::{Deserialize, Serialize};

/// Resolution policy and closed name lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Fabricate a transient attribute entry for a `key:<int>` the schema does not enumerate
    pub synthesize_on_miss: bool,

    /// Attribute member names that contain lowercase letters but are still valid
    pub irregular_member_names: Vec<String>,

    /// Prefixes of further irregular member names
    pub irregular_member_prefixes: Vec<String>,

    /// Names of fields known to live outside the schema; failures on them are expected
    pub opaque_fields: Vec<String>,

    /// Diagnostics kept per resolver; once full the oldest entry is dropped. Long-lived
    /// resolvers should drain with `take_diagnostics` between runs.
    pub max_diagnostics: usize,
}

/// Default bound on retained diagnostics
pub const DEFAULT_MAX_DIAGNOSTICS: usize = 10_000;

const IRREGULAR_MEMBER_NAMES: &[&str] = &[
    "AUTHOR_HISTORY_REALTIME_PURCHASE_TIMESTAMP_Flag",
    "USER_HISTORY_REALTIME_PURCHASE_TIMESTAMP_Flag",
    "LPS_LLM_LANDING_USER_LPS_1cate_30D",
];

const IRREGULAR_MEMBER_PREFIXES: &[&str] = &["LPS_LLM_LANDING_USER"];

const OPAQUE_FIELDS: &[&str] = &[
    "reco_user_info",
    "ad_user_history_photo_embedding",
    "is_train",
    "ad_user_ad_action_map",
    "h_maplist_append_req",
    "colossus_ad_live_item",
    "colossus_reco_live_v1_item",
    "colossus_reco_live_item",
    "colossus_ad_goods_item",
    "colossus_ad_goods_item_new",
    "colossus_ad_goods_item_new_pdn_v0",
    "colossus_reco_photo",
    "colossus_reco_photo_v3",
    "colossus_reco_photo_v3_pdn_v0",
    "colossus_ad_live_spu",
    "colossus_ad_live_cid3",
    "author_cluster_map",
    "live_cluster_map",
    "ad_live_global_gsu_result",
    "ad_live_ecomm_gsu_result",
    "ad_live_author_gsu_result",
    "ad_live_spu_gsu_result",
    "ad_live_cid3_gsu_result",
    "ad_live_author_cluster_gsu_result",
    "ad_live_remote_cluster_gsu_result",
    "reco_live_global_gsu_result",
    "reco_live_author_gsu_result",
    "reco_live_author_cluster_gsu_result",
    "reco_live_remote_cluster_gsu_result",
    "reco_live_v1_remote_cluster_gsu_result",
    "ad_live_colossus_idx_filtered_by_playtime",
    "ad_live_colossus_idx_filtered_by_label",
    "reco_live_colossus_idx_filtered_by_playtime",
    "ad_user_all_goods_action",
    "ad_user_history_pdct_embedding",
    "ad_user_histactpdct_pdct",
    "ad_user_histactpdct_firstid",
    "ad_user_histactpdct_secondid",
    "ad_user_histactpdct_u2uemb",
    "ad_user_histact_weight",
    "ad_user_histact_type",
    "picasso_ad_goods_item",
    "ad_live_delivering_author",
    "living_author_set",
    "ad_live_offline_sample_set",
];

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl ResolverConfig {
    /// Unindexed attribute keys fail to resolve
    pub fn strict() -> Self {
        Self {
            synthesize_on_miss: false,
            irregular_member_names: owned(IRREGULAR_MEMBER_NAMES),
            irregular_member_prefixes: owned(IRREGULAR_MEMBER_PREFIXES),
            opaque_fields: owned(OPAQUE_FIELDS),
            max_diagnostics: DEFAULT_MAX_DIAGNOSTICS,
        }
    }

    /// Unindexed attribute keys resolve to a synthesized entry
    pub fn synthesizing() -> Self {
        Self::strict().with_synthesis(true)
    }

    pub fn with_synthesis(mut self, enabled: bool) -> Self {
        self.synthesize_on_miss = enabled;
        self
    }

    pub fn with_opaque_field(mut self, name: impl Into<String>) -> Self {
        self.opaque_fields.push(name.into());
        self
    }

    pub fn with_max_diagnostics(mut self, max: usize) -> Self {
        self.max_diagnostics = max;
        self
    }

    pub fn is_irregular_member(&self, name: &str) -> bool {
        self.irregular_member_names.iter().any(|n| n == name)
            || self
                .irregular_member_prefixes
                .iter()
                .any(|p| name.starts_with(p.as_str()))
    }

    /// Substring match against the opaque list
    pub fn is_opaque(&self, path: &str) -> bool {
        self.opaque_fields.iter().any(|f| path.contains(f.as_str()))
    }
}
