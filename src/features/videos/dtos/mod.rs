mod video_dto;

pub use video_dto::{
    AuthorDto, CreateUploadDto, CreateUploadResponseDto, DeleteVideoResponseDto, ThumbnailDto,
    UpdateVideoMetadataDto, VideoMetricsDto, VideoResponseDto, VideoSettingsDto,
    VideoSettingsPatchDto,
};
