// Rule-based highlights shown above the KPI cards.
use std::fmt;

use serde::Serialize;
use shared::models::CampaignRecord;
use shared::utils::brazilian_format::format_currency;

use super::kpi::KpiSummary;
use super::ratio::ratio;
use crate::aggregation::aggregate;
use crate::aggregation::by_campaign::ByCampaignName;

pub const MAX_INSIGHTS: usize = 4;

const EXCELLENT_ROAS: f64 = 3.0;
const BREAK_EVEN_ROAS: f64 = 1.0;
const HIGH_CTR: f64 = 2.0;
const LOW_CTR: f64 = 0.5;
const EFFICIENT_CPC: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightSeverity {
    Success,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    ExcellentRoas { roas: f64 },
    LowRoas { roas: f64 },
    HighCtr { ctr: f64 },
    LowCtr { ctr: f64 },
    EfficientCpc { cpc: f64 },
    TopCampaign { campaign: String, roas: f64 },
}

impl Insight {
    pub fn severity(&self) -> InsightSeverity {
        match self {
            Insight::ExcellentRoas { .. } | Insight::HighCtr { .. } | Insight::EfficientCpc { .. } => InsightSeverity::Success,
            Insight::LowRoas { .. } | Insight::LowCtr { .. } => InsightSeverity::Warning,
            Insight::TopCampaign { .. } => InsightSeverity::Info,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Insight::ExcellentRoas { .. } => "ROAS Excelente",
            Insight::LowRoas { .. } => "ROAS Abaixo do Ideal",
            Insight::HighCtr { .. } => "CTR Acima da Média",
            Insight::LowCtr { .. } => "CTR Baixo",
            Insight::EfficientCpc { .. } => "CPC Eficiente",
            Insight::TopCampaign { .. } => "Destaque de Performance",
        }
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Insight::ExcellentRoas { roas } => write!(f, "ROAS de {:.2}x: cada R$1 investido retorna R${:.2}.", roas, roas),
            Insight::LowRoas { roas } => write!(f, "ROAS de {:.2}x. Vale otimizar as campanhas para melhorar o retorno.", roas),
            Insight::HighCtr { ctr } => write!(f, "Taxa de cliques de {:.2}% indica boa relevância dos anúncios.", ctr),
            Insight::LowCtr { ctr } => write!(f, "CTR de {:.2}%. Revise criativos e segmentação.", ctr),
            Insight::EfficientCpc { cpc } => write!(f, "Custo por clique de {} está em uma faixa eficiente.", format_currency(*cpc)),
            Insight::TopCampaign { campaign, roas } => write!(f, "\"{}\" tem o melhor ROAS: {:.2}x.", campaign, roas),
        }
    }
}

/// Applies the ROAS, CTR, CPC and top-campaign rules in that order and keeps
/// at most `max` of them.
pub fn smart_insights(summary: &KpiSummary, records: &[CampaignRecord], max: usize) -> Vec<Insight> {
    let metrics = &summary.metrics;
    let mut insights = Vec::new();

    if metrics.roas >= EXCELLENT_ROAS {
        insights.push(Insight::ExcellentRoas { roas: metrics.roas });
    } else if metrics.roas < BREAK_EVEN_ROAS {
        insights.push(Insight::LowRoas { roas: metrics.roas });
    }

    if metrics.ctr > HIGH_CTR {
        insights.push(Insight::HighCtr { ctr: metrics.ctr });
    } else if metrics.ctr < LOW_CTR {
        insights.push(Insight::LowCtr { ctr: metrics.ctr });
    }

    // A zero CPC (no clicks at all) also passes this rule.
    if metrics.cpc < EFFICIENT_CPC {
        insights.push(Insight::EfficientCpc { cpc: metrics.cpc });
    }

    if let Some(top) = top_campaign_by_roas(records) {
        insights.push(top);
    }

    insights.truncate(max);
    insights
}

// Ties go to the campaign seen first.
fn top_campaign_by_roas(records: &[CampaignRecord]) -> Option<Insight> {
    aggregate(records, &ByCampaignName)
        .iter()
        .map(|entry| (entry.key.as_str(), ratio(entry.totals.revenue, entry.totals.spend)))
        .fold(None, |best: Option<(&str, f64)>, (campaign, roas)| match best {
            Some((_, best_roas)) if best_roas >= roas => best,
            _ => Some((campaign, roas)),
        })
        .filter(|(_, roas)| *roas > 0.0)
        .map(|(campaign, roas)| Insight::TopCampaign {
            campaign: campaign.to_string(),
            roas,
        })
}
