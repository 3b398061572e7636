//! Built-in Philippine publisher table.

use super::DomainTier;

pub(super) const BUILTIN_TIERS: &[(DomainTier, &[&str])] = &[
    (
        DomainTier::Credible,
        &[
            "rappler.com",
            "inquirer.net",
            "gmanetwork.com",
            "abs-cbn.com",
            "philstar.com",
            "mb.com.ph",
            "manilatimes.net",
            "pna.gov.ph",
            "cnnphilippines.com",
            "bworldonline.com",
            "sunstar.com.ph",
            "pcij.org",
            "verafiles.org",
            "vera-files.org",
            "news.tv5.com.ph",
            "onenews.ph",
            "reuters.com",
            "apnews.com",
            "bbc.com",
            "afp.com",
        ],
    ),
    (
        DomainTier::SatireOpinion,
        &[
            "adobochronicles.com",
            "theonion.com",
            "babylonbee.com",
            "professionalheckler.wordpress.com",
            "medium.com",
            "blogspot.com",
            "wordpress.com",
        ],
    ),
    (
        DomainTier::KnownFake,
        &[
            "duterte.today",
            "pinoytrending.altervista.org",
            "filipinewsph.com",
            "okd2.com",
            "thevolatilian.com",
            "getrealphilippines.com",
            "trendingnewsportal.net.ph",
            "pilipinastoday.net",
            "newstitans.com",
            "showbizmanila.com",
        ],
    ),
];

pub(super) const BUILTIN_DESCRIPTIONS: &[(DomainTier, &str)] = &[
    (
        DomainTier::Credible,
        "Established Philippine and international news organisations",
    ),
    (
        DomainTier::SatireOpinion,
        "Satire, opinion blogs, and entertainment sites",
    ),
    (
        DomainTier::Suspicious,
        "Unknown, newly registered, or low-authority sites",
    ),
    (
        DomainTier::KnownFake,
        "Sites flagged by Philippine fact-checkers as fake news sources",
    ),
];
