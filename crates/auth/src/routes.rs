//! Console screens and their paths.

use autocatalog_core::EntityId;

/// Catalog sections reachable from the navigation menu.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Section {
    Vehicles,
    Articles,
    Brands,
    Categories,
    Solicitudes,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Vehicles,
        Section::Articles,
        Section::Brands,
        Section::Categories,
        Section::Solicitudes,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Section::Vehicles => "vehicles",
            Section::Articles => "articles",
            Section::Brands => "brands",
            Section::Categories => "categories",
            Section::Solicitudes => "solicitudes",
        }
    }

    fn from_slug(slug: &str) -> Option<Self> {
        Section::ALL.into_iter().find(|s| s.slug() == slug)
    }

    /// Leads have no form screens.
    pub fn has_forms(&self) -> bool {
        !matches!(self, Section::Solicitudes)
    }

    fn singular(&self) -> &'static str {
        match self {
            Section::Vehicles => "VEHICULO",
            Section::Articles => "ARTICULO",
            Section::Brands => "MARCA",
            Section::Categories => "CATEGORIA",
            Section::Solicitudes => "SOLICITUD",
        }
    }

    fn plural(&self) -> &'static str {
        match self {
            Section::Vehicles => "VEHICULOS",
            Section::Articles => "ARTICULOS",
            Section::Brands => "MARCAS",
            Section::Categories => "CATEGORIAS",
            Section::Solicitudes => "SOLICITUDES",
        }
    }
}

/// A screen of the console.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    List(Section),
    New(Section),
    Edit(Section, EntityId),
}

impl Route {
    /// Parse a path. Returns `None` for paths that match no screen.
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Some(Route::Dashboard),
            ["login"] => Some(Route::Login),
            [slug] => Section::from_slug(slug).map(Route::List),
            [slug, "new"] => Section::from_slug(slug)
                .filter(Section::has_forms)
                .map(Route::New),
            [slug, "edit", id] => {
                let section = Section::from_slug(slug).filter(Section::has_forms)?;
                let id = id.parse::<EntityId>().ok()?;
                Some(Route::Edit(section, id))
            }
            _ => None,
        }
    }

    /// Parse a path, sending unknown paths to the dashboard.
    pub fn resolve(path: &str) -> Route {
        Route::parse(path).unwrap_or(Route::Dashboard)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/".to_string(),
            Route::List(section) => format!("/{}", section.slug()),
            Route::New(section) => format!("/{}/new", section.slug()),
            Route::Edit(section, id) => format!("/{}/edit/{}", section.slug(), id),
        }
    }

    /// Screen title.
    pub fn name(&self) -> String {
        match self {
            Route::Login => "Login".to_string(),
            Route::Dashboard => "INICIO".to_string(),
            Route::List(section) => section.plural().to_string(),
            Route::New(section) => format!("CREAR {}", section.singular()),
            Route::Edit(section, _) => format!("EDITAR {}", section.singular()),
        }
    }

    /// Every screen except login sits behind the session check.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login)
    }

    pub fn section(&self) -> Option<Section> {
        match self {
            Route::List(s) | Route::New(s) | Route::Edit(s, _) => Some(*s),
            Route::Login | Route::Dashboard => None,
        }
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.path())
    }
}
