use crate::booking::submission::StoreError;
use crate::models::{Service, Stylist};

/// Where a catalog list came from. The fallback decision is kept visible so
/// callers (and tests) can tell a healthy store read from a degraded one.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogLoad<T> {
    Loaded(T),
    Fallback(T),
}

impl<T> CatalogLoad<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Self::Loaded(inner) | Self::Fallback(inner) => inner,
        }
    }
}

/// Read-side of the record store for the bookable catalog.
pub trait CatalogSource {
    fn load_services(&self) -> impl Future<Output = Result<Vec<Service>, StoreError>> + Send;
    fn load_stylists(&self) -> impl Future<Output = Result<Vec<Stylist>, StoreError>> + Send;
}

/// Guarantees the booking flow always has a non-empty catalog: store reads
/// are attempted first, and an empty result or any store failure falls back
/// to the built-in defaults. Never fails outward.
pub struct CatalogProvider<S> {
    source: S,
}

impl<S: CatalogSource> CatalogProvider<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn services(&self) -> CatalogLoad<Vec<Service>> {
        match self.source.load_services().await {
            Ok(services) if !services.is_empty() => CatalogLoad::Loaded(services),
            Ok(_) => CatalogLoad::Fallback(default_services()),
            Err(err) => {
                tracing::warn!(error = %err, "service catalog load failed, using defaults");
                CatalogLoad::Fallback(default_services())
            }
        }
    }

    pub async fn stylists(&self) -> CatalogLoad<Vec<Stylist>> {
        match self.source.load_stylists().await {
            Ok(stylists) if !stylists.is_empty() => CatalogLoad::Loaded(stylists),
            Ok(_) => CatalogLoad::Fallback(default_stylists()),
            Err(err) => {
                tracing::warn!(error = %err, "stylist catalog load failed, using defaults");
                CatalogLoad::Fallback(default_stylists())
            }
        }
    }
}

pub fn default_services() -> Vec<Service> {
    vec![
        Service {
            id: "1".into(),
            name: "Haircut & Style".into(),
            description: "Precision cut and professional styling to suit your face shape and preferences.".into(),
            price: 85,
            duration: 60,
        },
        Service {
            id: "2".into(),
            name: "Color & Highlights".into(),
            description: "Full color or dimensional highlights with expert application techniques.".into(),
            price: 120,
            duration: 120,
        },
        Service {
            id: "3".into(),
            name: "Blowout & Styling".into(),
            description: "Professional blowdry and styling to achieve your desired look.".into(),
            price: 65,
            duration: 45,
        },
        Service {
            id: "4".into(),
            name: "Hair Treatment".into(),
            description: "Deep conditioning and specialized treatments to repair and revitalize your hair.".into(),
            price: 95,
            duration: 75,
        },
        Service {
            id: "5".into(),
            name: "Bridal Hair".into(),
            description: "Complete bridal styling with trial session to perfect your wedding day look.".into(),
            price: 150,
            duration: 90,
        },
    ]
}

pub fn default_stylists() -> Vec<Stylist> {
    vec![
        Stylist {
            id: "1".into(),
            name: "Alex Morgan".into(),
            role: "Master Stylist".into(),
            image: "/images/stylists/alex-morgan.jpg".into(),
            bio: "With over 10 years of experience, Alex specializes in precision cuts and color techniques.".into(),
        },
        Stylist {
            id: "2".into(),
            name: "Jamie Rodriguez".into(),
            role: "Color Specialist".into(),
            image: "/images/stylists/jamie-rodriguez.jpg".into(),
            bio: "Jamie is our go-to expert for complex color transformations and balayage techniques.".into(),
        },
        Stylist {
            id: "3".into(),
            name: "Taylor Kim".into(),
            role: "Stylist & Texture Expert".into(),
            image: "/images/stylists/taylor-kim.jpg".into(),
            bio: "Taylor specializes in curly hair and creating stunning texture-focused styles.".into(),
        },
        Stylist {
            id: "4".into(),
            name: "Jordan Smith".into(),
            role: "Senior Stylist".into(),
            image: "/images/stylists/jordan-smith.jpg".into(),
            bio: "Jordan brings innovative techniques and a contemporary approach to classic styling.".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubSource {
        services: Result<Vec<Service>, String>,
        stylists: Result<Vec<Stylist>, String>,
    }

    impl CatalogSource for StubSource {
        async fn load_services(&self) -> Result<Vec<Service>, StoreError> {
            self.services.clone().map_err(StoreError)
        }

        async fn load_stylists(&self) -> Result<Vec<Stylist>, StoreError> {
            self.stylists.clone().map_err(StoreError)
        }
    }

    #[tokio::test]
    async fn store_backed_lists_keep_store_order() {
        let mut services = default_services();
        services.reverse();
        let provider = CatalogProvider::new(StubSource {
            services: Ok(services.clone()),
            stylists: Ok(default_stylists()),
        });

        let load = provider.services().await;
        assert!(!load.is_fallback());
        assert_eq!(load.into_inner(), services);
    }

    #[tokio::test]
    async fn empty_store_result_falls_back_to_defaults() {
        let provider = CatalogProvider::new(StubSource {
            services: Ok(Vec::new()),
            stylists: Ok(Vec::new()),
        });

        let services = provider.services().await;
        assert!(services.is_fallback());
        assert_eq!(services.into_inner(), default_services());

        let stylists = provider.stylists().await;
        assert!(stylists.is_fallback());
        assert_eq!(stylists.into_inner(), default_stylists());
    }

    #[tokio::test]
    async fn store_failure_falls_back_and_never_errors() {
        let provider = CatalogProvider::new(StubSource {
            services: Err("store unreachable".into()),
            stylists: Err("store unreachable".into()),
        });

        let services = provider.services().await;
        assert!(services.is_fallback());
        assert!(!services.into_inner().is_empty());
    }

    #[test]
    fn defaults_are_never_empty() {
        assert_eq!(default_services().len(), 5);
        assert_eq!(default_stylists().len(), 4);
    }
}
