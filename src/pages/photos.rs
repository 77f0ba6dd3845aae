//! Photo gallery page

use serde::Serialize;

use crate::data::PhotoRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoTile {
    pub slug: String,
    pub title: String,
    pub img_src: String,
}

/// One tile per photo record, in declaration order
#[derive(Debug, Clone, Serialize)]
pub struct PhotoGallery {
    pub tiles: Vec<PhotoTile>,
}

impl PhotoGallery {
    pub fn compose(photos: &[PhotoRecord]) -> Self {
        Self {
            tiles: photos
                .iter()
                .map(|p| PhotoTile {
                    slug: p.slug.clone(),
                    title: p.title.clone(),
                    img_src: p.img_src.clone(),
                })
                .collect(),
        }
    }
}
