use tweetprice_domain::repositories::artifacts::JoinArtifactWriter;
use tweetprice_domain::repositories::tables::TableSource;
use tweetprice_infrastructure::artifacts::FilesystemJoinWriter;
use tweetprice_infrastructure::tables::CsvTableSource;

pub struct JoinDeps {
    pub tables: Box<dyn TableSource>,
    pub artifacts: Box<dyn JoinArtifactWriter>,
}

pub struct ValidateDeps {
    pub tables: Box<dyn TableSource>,
}

pub fn build_join_deps() -> JoinDeps {
    JoinDeps {
        tables: Box::new(CsvTableSource),
        artifacts: Box::new(FilesystemJoinWriter::new()),
    }
}

pub fn build_validate_deps() -> ValidateDeps {
    ValidateDeps {
        tables: Box::new(CsvTableSource),
    }
}
