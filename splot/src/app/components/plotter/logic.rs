use tabular::DataTable;

use super::interact::category_key;
use super::scale::{ColorScale, LinearScale};
use super::{FieldMapping, Mark, Scene};

/// Everything a render cycle depends on, captured as one immutable value so
/// building a scene is a pure function of its input.
pub struct RenderRequest<'a> {
    pub table: &'a DataTable,
    pub mapping: &'a FieldMapping,
}

/// Build the visual scene: one mark per record with plottable X/Y values,
/// nice-expanded linear scales and the categorical color domain. The caller
/// replaces any previous scene with the result.
pub fn build_scene(request: &RenderRequest<'_>) -> Result<Scene, String> {
    let mapping = request.mapping;
    let (Some(xfield), Some(yfield), Some(cfield)) = (&mapping.x, &mapping.y, &mapping.color)
    else {
        return Err("select X, Y and color fields first".into());
    };

    let mut marks = Vec::with_capacity(request.table.len());
    for (row, record) in request.table.records().iter().enumerate() {
        // Records where X or Y is missing or non-numeric produce no mark.
        let (Some(x), Some(y)) = (
            record.get(xfield).as_number(),
            record.get(yfield).as_number(),
        ) else {
            continue;
        };
        marks.push(Mark {
            row,
            x,
            y,
            category: category_key(record.get(cfield)),
        });
    }
    if marks.is_empty() {
        return Err(format!(
            "no rows with plottable values in fields '{xfield}'/'{yfield}'"
        ));
    }

    // Scale domains cover the field over all records, so a row skipped for
    // a missing y value still widens the x-domain.
    let xscale = LinearScale::from_extent(field_values(request.table, xfield))
        .ok_or_else(|| format!("field '{xfield}' has no finite values"))?
        .nice();
    let yscale = LinearScale::from_extent(field_values(request.table, yfield))
        .ok_or_else(|| format!("field '{yfield}' has no finite values"))?
        .nice();

    // Color domain in distinct-value order (numeric categories arrive
    // sorted). Distinct keys can collide, e.g. Number(3) and Text("3"), so
    // dedupe on the key.
    let mut domain: Vec<String> = Vec::new();
    for value in request.table.distinct_values(cfield) {
        let key = category_key(&value);
        if !domain.contains(&key) {
            domain.push(key);
        }
    }
    if marks.iter().any(|m| m.category == category_key(&tabular::Value::Null))
        && !domain.iter().any(|c| c == &category_key(&tabular::Value::Null))
    {
        domain.push(category_key(&tabular::Value::Null));
    }

    Ok(Scene {
        marks,
        xscale,
        yscale,
        colors: ColorScale::new(domain),
        mapping: mapping.clone(),
    })
}

fn field_values<'a>(table: &'a DataTable, field: &'a str) -> impl Iterator<Item = f64> + 'a {
    table
        .records()
        .iter()
        .filter_map(move |record| record.get(field).as_number())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn mapping() -> FieldMapping {
        FieldMapping {
            x: Some("x".into()),
            y: Some("y".into()),
            color: Some("label".into()),
            image: None,
        }
    }

    #[test]
    fn test_one_mark_per_plottable_row() {
        init();
        let table = tabular::from_csv_str("x,y,label\n1,2,a\n3,4,b\n,6,c\n7,oops,d\n").unwrap();
        let mapping = mapping();
        let request = RenderRequest {
            table: &table,
            mapping: &mapping,
        };
        let scene = build_scene(&request).unwrap();
        // Rows with empty or non-numeric x/y are skipped.
        assert_eq!(scene.marks.len(), 2);
        assert_eq!(scene.marks[0].row, 0);
        assert_eq!(scene.marks[1].row, 1);
    }

    #[test]
    fn test_rebuild_is_stable() {
        init();
        let table = tabular::from_csv_str("x,y,label\n1,2,a\n3,4,b\n").unwrap();
        let mapping = mapping();
        let request = RenderRequest {
            table: &table,
            mapping: &mapping,
        };
        let first = build_scene(&request).unwrap();
        let second = build_scene(&request).unwrap();
        assert_eq!(first.marks, second.marks);
        assert_eq!(first.colors.domain(), second.colors.domain());
        assert_eq!(first.xscale, second.xscale);
    }

    #[test]
    fn test_incomplete_mapping_is_rejected() {
        init();
        let table = tabular::from_csv_str("x,y\n1,2\n").unwrap();
        let mapping = FieldMapping {
            x: Some("x".into()),
            y: Some("y".into()),
            color: None,
            image: None,
        };
        let request = RenderRequest {
            table: &table,
            mapping: &mapping,
        };
        assert!(build_scene(&request).is_err());
    }

    #[test]
    fn test_numeric_categories_arrive_sorted() {
        init();
        let table = tabular::from_csv_str("x,y,label\n1,1,9\n2,2,0\n3,3,5\n").unwrap();
        let mapping = mapping();
        let request = RenderRequest {
            table: &table,
            mapping: &mapping,
        };
        let scene = build_scene(&request).unwrap();
        assert_eq!(scene.colors.domain(), &["0", "5", "9"]);
    }

    #[test]
    fn test_null_color_values_form_their_own_category() {
        init();
        let table = tabular::from_csv_str("x,y,label\n1,1,\n2,2,a\n").unwrap();
        let mapping = mapping();
        let request = RenderRequest {
            table: &table,
            mapping: &mapping,
        };
        let scene = build_scene(&request).unwrap();
        assert_eq!(scene.marks.len(), 2);
        assert!(scene.colors.domain().iter().any(|c| c == "(empty)"));
    }

    #[test]
    fn test_no_plottable_rows_is_an_error() {
        init();
        let table = tabular::from_csv_str("x,y,label\nfoo,bar,a\n").unwrap();
        let mapping = mapping();
        let request = RenderRequest {
            table: &table,
            mapping: &mapping,
        };
        let err = build_scene(&request).unwrap_err();
        assert!(err.contains("no rows with plottable values"));
    }

    #[test]
    fn test_scale_extent_covers_rows_without_marks() {
        init();
        let table = tabular::from_csv_str("x,y,label\n1,2,a\n100,oops,b\n").unwrap();
        let mapping = mapping();
        let request = RenderRequest {
            table: &table,
            mapping: &mapping,
        };
        let scene = build_scene(&request).unwrap();
        // The second row produces no mark (text y), but its x value still
        // belongs to the x-domain.
        assert_eq!(scene.marks.len(), 1);
        assert!(scene.xscale.stop() >= 100.0);
    }

    #[test]
    fn test_clear_scene_drops_all_marks() {
        init();
        let table = tabular::from_csv_str("x,y,label\n1,2,a\n3,4,b\n").unwrap();
        let mapping = mapping();
        let request = RenderRequest {
            table: &table,
            mapping: &mapping,
        };
        let mut plotter = super::super::Plotter::new();
        plotter.replace_scene(build_scene(&request).unwrap());
        assert_eq!(plotter.mark_count(), 2);
        plotter.clear_scene();
        assert_eq!(plotter.mark_count(), 0);
    }

    #[test]
    fn test_scales_cover_extent_with_round_bounds() {
        init();
        let table = tabular::from_csv_str("x,y,label\n0.2,12,a\n9.7,87,b\n").unwrap();
        let mapping = mapping();
        let request = RenderRequest {
            table: &table,
            mapping: &mapping,
        };
        let scene = build_scene(&request).unwrap();
        assert_eq!((scene.xscale.start(), scene.xscale.stop()), (0.0, 10.0));
        assert_eq!((scene.yscale.start(), scene.yscale.stop()), (10.0, 90.0));
    }
}
