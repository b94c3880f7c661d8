use crate::error::ParseError;
use crate::fixtures::ProfilePage;
use crate::parsers::{parse, profile};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_profile_page() {
        let page = ProfilePage::new("启功")
            .related(&["A", "B", "A"])
            .organizations(&["中文系", "书法研究所"])
            .subjects(&["书法", "古典文献学"])
            .event("1912年", &["生于北京"])
            .event("1952年", &["任北京师范大学中文系副教授", "同年加入九三学社"]);
        let doc = parse(&page.to_html());

        // Duplicates are kept as listed
        assert_eq!(profile::related_names(&doc).unwrap(), vec!["A", "B", "A"]);
        assert_eq!(profile::biography(&doc).unwrap(), "启功，北京师范大学教授。");
        assert_eq!(profile::organizations(&doc).unwrap(), vec!["中文系", "书法研究所"]);
        assert_eq!(profile::subjects(&doc).unwrap(), vec!["书法", "古典文献学"]);

        let events = profile::events(&doc).unwrap();
        assert_eq!(events.keys().collect::<Vec<_>>(), vec!["1912年", "1952年"]);
        assert_eq!(events.get("1952年").unwrap().len(), 2);
    }

    #[test]
    fn test_missing_headings_yield_empty_lists() {
        let doc = parse(&ProfilePage::new("B").to_html());

        assert!(profile::organizations(&doc).unwrap().is_empty());
        assert!(profile::subjects(&doc).unwrap().is_empty());
        assert!(profile::related_names(&doc).unwrap().is_empty());
        assert!(profile::events(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_heading_must_match_exactly() {
        let html = "<html><body><section>\
                    <div></div><div></div><div>简介</div><div><ul></ul></div>\
                    <div><h4> 相关机构 </h4><p>中文系</p><h4>相关学科</h4></div>\
                    <div><dl></dl></div>\
                    </section></body></html>";
        let doc = parse(html);

        // Surrounding whitespace is not trimmed before comparing
        assert!(profile::organizations(&doc).unwrap().is_empty());
        // Matching heading without a following element
        assert!(profile::subjects(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_repeated_event_label_keeps_first_position() {
        let page = ProfilePage::new("C")
            .event("1950年代", &["甲"])
            .event("1960年", &["乙"])
            .event("1950年代", &["丙"]);
        let events = profile::events(&parse(&page.to_html())).unwrap();

        assert_eq!(events.keys().collect::<Vec<_>>(), vec!["1950年代", "1960年"]);
        assert_eq!(events.get("1950年代").unwrap(), &vec!["丙".to_string()]);
    }

    #[test]
    fn test_structural_errors() {
        let doc = parse("<html><body><p>not a profile</p></body></html>");
        assert!(matches!(profile::related_names(&doc), Err(ParseError::MissingSection)));

        let doc = parse("<html><body><section><div></div><div></div></section></body></html>");
        assert!(matches!(profile::related_names(&doc), Err(ParseError::MissingBlock(_))));
        assert!(matches!(profile::biography(&doc), Err(ParseError::MissingBlock(_))));
        assert!(matches!(
            profile::events(&doc),
            Err(ParseError::MissingElement { element: "dl", .. })
        ));

        let doc = parse(
            "<html><body><section><div></div><div></div><div></div><div>no list</div></section></body></html>",
        );
        assert!(matches!(
            profile::related_names(&doc),
            Err(ParseError::MissingElement { element: "ul", .. })
        ));
    }

    #[test]
    fn test_detail_without_label() {
        let doc = parse("<html><body><section><div><dl><dd>孤立</dd><dt>1912年</dt></dl></div></section></body></html>");
        assert!(matches!(profile::events(&doc), Err(ParseError::OrphanDetail(t)) if t == "孤立"));
    }
}
