#[cfg(test)]
mod verify {
    use std::path::Path;

    use gedfix::parsing::parser::ParsingError;
    use gedfix::parsing::{self, read};

    #[test]
    fn well_formed_input_builds_records() {
        let (document, _) = read("0 HEAD\n1 GEDC\n0 @I1@ INDI\n0 TRLR\n").unwrap();
        assert_eq!(
            document
                .records
                .len(),
            3
        );
        assert_eq!(document.records[0].lines.len(), 2);
        assert_eq!(document.records[1].lines[0].tag, "@I1@");
    }

    #[test]
    fn windows_line_endings_accepted() {
        let (document, _) = read("0 HEAD\r\n1 GEDC\r\n0 TRLR\r\n").unwrap();
        assert_eq!(
            document
                .records
                .len(),
            2
        );
        assert_eq!(document.records[0].lines[1].tag, "GEDC");
    }

    #[test]
    fn unparseable_level_is_fatal() {
        let result = read("0 HEAD\nx NAME John\n");
        assert_eq!(result.unwrap_err(), ParsingError::InvalidLevel(2, "x"));
    }

    #[test]
    fn line_without_tag_is_fatal() {
        let result = read("0 HEAD\n0\n");
        assert_eq!(result.unwrap_err(), ParsingError::MissingTag(2));

        let result = read("0 HEAD\n\n0 TRLR\n");
        assert_eq!(result.unwrap_err(), ParsingError::MissingTag(2));
    }

    #[test]
    fn line_before_any_record_is_fatal() {
        let result = read("1 NAME John\n");
        assert_eq!(result.unwrap_err(), ParsingError::OutsideRecord(1));
    }

    #[test]
    fn loading_a_missing_file_is_reported() {
        let filename = Path::new("/no/such/file.ged");
        let error = parsing::load(filename).unwrap_err();
        assert_eq!(error.problem, "File not found");
        assert_eq!(error.filename, filename);
    }
}
